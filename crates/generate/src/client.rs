//! Generation service wire types and HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use voice_assist_core::{HistoryItem, ResponseOption};

use crate::GenerateError;

/// Generation request payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Finalized patron utterance
    pub patron_text: String,
    /// Full ordered conversation history, oldest first
    pub conversation_history: Vec<HistoryItem>,
    /// Active language code
    pub selected_language: String,
}

/// Generation response payload
///
/// The options list is validated by the orchestrator before use; unknown
/// fields from the service are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default)]
    pub options: Vec<ResponseOption>,
    /// The service degraded to its canned response set
    #[serde(default)]
    pub fallback: bool,
}

/// Backend seam for the generation service
#[async_trait]
pub trait GenerateBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerateError>;
}

/// HTTP client for the generation service
pub struct HttpGenerateClient {
    client: Client,
    endpoint: String,
}

impl HttpGenerateClient {
    /// Create a client for the given endpoint, e.g. `http://host/api/generate`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Probe a service health endpoint
    pub async fn health(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl GenerateBackend for HttpGenerateClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerateError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerateError::Transport(format!(
                "generation service returned {}",
                response.status()
            )));
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| GenerateError::MalformedResponse(e.to_string()))
    }
}
