//! Recognition engine seam
//!
//! The platform recognition capability is callback-driven and cannot change
//! language on a running instance, so engines are created per recording,
//! configured for exactly one locale.

use tokio::sync::mpsc;

use crate::CaptureError;

/// Error condition surfaced by a recognition engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionFault {
    /// Capture was aborted; transient
    Aborted,
    /// Nothing was heard in the capture window; transient
    NoSpeech,
    /// Any other engine error code
    Other(String),
}

impl RecognitionFault {
    /// Parse an engine error code
    pub fn from_code(code: &str) -> Self {
        match code {
            "aborted" => Self::Aborted,
            "no-speech" => Self::NoSpeech,
            other => Self::Other(other.to_string()),
        }
    }

    /// Transient faults are suppressed with no user-visible effect
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Aborted | Self::NoSpeech)
    }

    /// Status text for recoverable faults
    pub fn message(&self) -> String {
        match self {
            Self::Aborted => "capture aborted".to_string(),
            Self::NoSpeech => "no speech detected".to_string(),
            Self::Other(code) => format!("speech recognition error: {code}"),
        }
    }
}

/// Event emitted by a recognition engine, in arrival order
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// Interim (unstable) text segment
    Interim(String),
    /// Finalized text segment
    Final(String),
    /// Engine error condition
    Error(RecognitionFault),
}

/// A configured recognition engine instance
///
/// One instance per recording; the locale is fixed at creation.
pub trait RecognitionEngine: Send {
    /// Begin continuous capture, emitting events on the given channel
    fn start(&mut self, events: mpsc::Sender<RecognitionEvent>) -> Result<(), CaptureError>;

    /// End capture; events already emitted may still arrive
    fn stop(&mut self);
}

/// Factory for recognition engines
pub trait RecognitionProvider: Send + Sync {
    /// Create an engine configured for the given recognition locale
    fn create(&self, locale: &str) -> Result<Box<dyn RecognitionEngine>, CaptureError>;
}
