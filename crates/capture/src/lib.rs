//! Speech capture over a pluggable recognition engine
//!
//! Wraps a continuous speech-recognition capability behind trait seams:
//! - `RecognitionEngine` / `RecognitionProvider` for the platform engine
//! - transient-error suppression ("aborted", "no speech detected")
//! - forwarded capture events for the session layer

pub mod capture;
pub mod recognition;

pub use capture::{CaptureEvent, SpeechCapture};
pub use recognition::{
    RecognitionEngine, RecognitionEvent, RecognitionFault, RecognitionProvider,
};

use thiserror::Error;

/// Capture errors
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Recognition engine error: {0}")]
    Engine(String),
}
