//! Configuration for the voice assistant
//!
//! Layered settings: optional file source plus `VOICE_ASSIST__*`
//! environment overrides.

pub mod settings;

pub use settings::{ObservabilityConfig, ServiceConfig, SessionSettings, Settings};

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
