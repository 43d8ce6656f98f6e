//! Session states

/// Gating states for the voice session
///
/// Exactly one value is active at any time, owned by the session machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a capture-start action
    Idle,
    /// Continuous capture running
    Recording,
    /// Awaiting the generation response
    Processing,
    /// Reply options displayed, awaiting selection
    AwaitingSelection,
    /// Voicing the chosen reply
    Speaking,
}
