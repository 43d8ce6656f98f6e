//! Synthesis service wire types and HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::PlaybackError;

/// Synthesis request payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SynthesizeRequest {
    /// Reply text to synthesize
    pub text: String,
    /// Active language code
    pub language: String,
}

/// Synthesis response payload
///
/// `audio` carries the encoded audio bytes as base64 text; its absence, or
/// `success == false`, triggers the local fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesizeResponse {
    pub success: bool,
    #[serde(default)]
    pub audio: Option<String>,
}

/// Backend seam for the synthesis service
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    async fn synthesize(
        &self,
        request: &SynthesizeRequest,
    ) -> Result<SynthesizeResponse, PlaybackError>;
}

/// HTTP client for the synthesis service
pub struct HttpSynthesisClient {
    client: Client,
    endpoint: String,
}

impl HttpSynthesisClient {
    /// Create a client for the given endpoint, e.g. `http://host/api/tts`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PlaybackError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlaybackError::Synthesis(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SynthesisBackend for HttpSynthesisClient {
    async fn synthesize(
        &self,
        request: &SynthesizeRequest,
    ) -> Result<SynthesizeResponse, PlaybackError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| PlaybackError::Synthesis(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlaybackError::Synthesis(format!(
                "synthesis service returned {}",
                response.status()
            )));
        }

        response
            .json::<SynthesizeResponse>()
            .await
            .map_err(|e| PlaybackError::Synthesis(e.to_string()))
    }
}
