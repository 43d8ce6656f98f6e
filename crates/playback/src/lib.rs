//! Speech playback with local-synthesis fallback
//!
//! The primary path requests synthesized audio from the network service and
//! plays the decoded bytes through an audio sink. When the service fails or
//! declines to return audio, a local synthesis capability voices the reply
//! with a fixed rate/pitch and a best-effort voice-selection heuristic.

pub mod engine;
pub mod local;
pub mod sink;
pub mod synthesis;

pub use engine::{PlaybackEngine, PlaybackReport, PlaybackRoute};
pub use local::{
    fallback_locale, select_voice, LocalSpeech, LocalSynthesizer, LocalVoice,
    LOCAL_FALLBACK_PITCH, LOCAL_FALLBACK_RATE,
};
pub use sink::AudioSink;
pub use synthesis::{HttpSynthesisClient, SynthesisBackend, SynthesizeRequest, SynthesizeResponse};

use thiserror::Error;

/// Playback errors
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Synthesis request failed: {0}")]
    Synthesis(String),

    #[error("Audio playback failed: {0}")]
    Sink(String),

    #[error("Local synthesis failed: {0}")]
    Local(String),
}
