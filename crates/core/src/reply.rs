//! Generated reply options

use serde::{Deserialize, Serialize};

/// Number of reply options a generation call yields
pub const RESPONSE_OPTION_COUNT: usize = 4;

/// A tone-labeled candidate reply
///
/// Options arrive as an ordered set; two options may carry identical text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseOption {
    /// Register label, e.g. "formal" or "warm"
    pub tone: String,
    /// Reply text to be spoken
    pub response: String,
}
