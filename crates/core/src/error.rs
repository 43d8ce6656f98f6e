//! Core error types

use thiserror::Error;

/// Core errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),
}

/// Core result alias
pub type Result<T> = std::result::Result<T, Error>;
