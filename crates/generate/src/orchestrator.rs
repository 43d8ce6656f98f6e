//! Response orchestration and payload validation

use std::sync::Arc;

use tracing::{debug, warn};

use voice_assist_core::{HistoryItem, LanguageCode, ResponseOption, RESPONSE_OPTION_COUNT};

use crate::client::{GenerateBackend, GenerateRequest};
use crate::GenerateError;

/// Validated outcome of a generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReplies {
    /// Tone-labeled reply options, in service order
    pub options: Vec<ResponseOption>,
    /// The service fell back to its canned response set
    pub fallback: bool,
}

/// Issues generation requests and validates responses
///
/// A single request per utterance; no automatic retry. The caller re-issues
/// by repeating the recording flow.
pub struct ResponseOrchestrator {
    backend: Arc<dyn GenerateBackend>,
}

impl ResponseOrchestrator {
    pub fn new(backend: Arc<dyn GenerateBackend>) -> Self {
        Self { backend }
    }

    /// Request reply options for the given utterance
    ///
    /// The history is the full ordered log, not including the utterance
    /// being answered. Transport failures, service-reported failure, and
    /// malformed option lists are all reported as errors.
    pub async fn request_replies(
        &self,
        utterance: &str,
        history: Vec<HistoryItem>,
        language: LanguageCode,
    ) -> Result<GeneratedReplies, GenerateError> {
        let request = GenerateRequest {
            patron_text: utterance.to_string(),
            conversation_history: history,
            selected_language: language.code().to_string(),
        };

        let response = self.backend.generate(&request).await?;

        if !response.success {
            return Err(GenerateError::ServiceFailure);
        }

        if response.options.len() != RESPONSE_OPTION_COUNT {
            warn!(
                count = response.options.len(),
                "generation returned an unexpected option count"
            );
            return Err(GenerateError::MalformedResponse(format!(
                "expected {} options, got {}",
                RESPONSE_OPTION_COUNT,
                response.options.len()
            )));
        }

        debug!(fallback = response.fallback, "generation succeeded");

        Ok(GeneratedReplies {
            options: response.options,
            fallback: response.fallback,
        })
    }
}
