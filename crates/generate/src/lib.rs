//! Reply generation client
//!
//! Sends the finalized patron utterance plus conversation history to the
//! external generation service and validates the returned tone-labeled
//! reply options before they reach the session.

pub mod client;
pub mod orchestrator;

pub use client::{GenerateBackend, GenerateRequest, GenerateResponse, HttpGenerateClient};
pub use orchestrator::{GeneratedReplies, ResponseOrchestrator};

use thiserror::Error;

/// Generation errors
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Generation request failed: {0}")]
    Transport(String),

    #[error("Generation service reported failure")]
    ServiceFailure,

    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),
}
