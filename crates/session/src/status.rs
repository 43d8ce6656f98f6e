//! User-facing session status
//!
//! Every failure is absorbed into one of these plus a stable state; the
//! status line is the only error surface the patron-facing UI shows.

use std::fmt;

/// Human-readable status surfaced to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Session is idle and ready
    Ready,
    /// Capture is running
    Listening,
    /// Generation request in flight
    Generating,
    /// Recording stopped with no finalized text; not an error
    NoSpeechDetected,
    /// Reply options are ready; `fallback` marks the canned response set
    RepliesReady { fallback: bool },
    /// The chosen reply is being voiced
    Speaking,
    /// Generation failed; the patron restarts the recording flow
    GenerationFailed,
    /// A capture-start was rejected while the persona is speaking
    Busy,
    /// The action is not valid in the current state
    NotReady,
    /// Recoverable recognition fault
    RecognitionFault(String),
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Listening => write!(f, "listening..."),
            Self::Generating => write!(f, "thinking of replies..."),
            Self::NoSpeechDetected => write!(f, "no speech detected"),
            Self::RepliesReady { fallback: false } => write!(f, "choose a reply"),
            Self::RepliesReady { fallback: true } => {
                write!(f, "choose a reply (offline suggestions)")
            }
            Self::Speaking => write!(f, "speaking..."),
            Self::GenerationFailed => {
                write!(f, "could not generate replies, please try again")
            }
            Self::Busy => write!(f, "busy speaking, please wait"),
            Self::NotReady => write!(f, "that action is not available right now"),
            Self::RecognitionFault(message) => f.write_str(message),
        }
    }
}
