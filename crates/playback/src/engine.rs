//! Playback engine
//!
//! Every path resolves so the session always regains control; synthesis
//! failures are never surfaced to the user and silently fall back to
//! local synthesis.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::{debug, warn};

use voice_assist_core::LanguageCode;

use crate::local::{
    fallback_locale, select_voice, LocalSpeech, LocalSynthesizer, LOCAL_FALLBACK_PITCH,
    LOCAL_FALLBACK_RATE,
};
use crate::sink::AudioSink;
use crate::synthesis::{SynthesisBackend, SynthesizeRequest};

/// Which path produced the audible reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackRoute {
    /// Network-synthesized audio played through the sink
    Network,
    /// Local synthesis fallback
    LocalFallback,
}

/// Outcome of a playback request
///
/// Playback always resolves; a playback-side error is carried here for
/// logging only and never fails the conversational flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackReport {
    pub route: PlaybackRoute,
    pub error: Option<String>,
}

/// Voices chosen replies, falling back to local synthesis
pub struct PlaybackEngine {
    synthesis: Arc<dyn SynthesisBackend>,
    sink: Arc<dyn AudioSink>,
    local: Arc<dyn LocalSynthesizer>,
}

impl PlaybackEngine {
    pub fn new(
        synthesis: Arc<dyn SynthesisBackend>,
        sink: Arc<dyn AudioSink>,
        local: Arc<dyn LocalSynthesizer>,
    ) -> Self {
        Self {
            synthesis,
            sink,
            local,
        }
    }

    /// Speak the chosen reply; resolves when playback has ended
    pub async fn speak(&self, text: &str, language: LanguageCode) -> PlaybackReport {
        match self.network_audio(text, language).await {
            Some(audio) => {
                debug!(bytes = audio.len(), "playing network-synthesized audio");

                let error = self.sink.play(audio).await.err().map(|e| e.to_string());
                if let Some(error) = &error {
                    warn!("audio playback error: {error}");
                }

                PlaybackReport {
                    route: PlaybackRoute::Network,
                    error,
                }
            }
            None => self.speak_fallback(text, language).await,
        }
    }

    /// Request and decode network audio; `None` routes to the fallback
    async fn network_audio(&self, text: &str, language: LanguageCode) -> Option<Vec<u8>> {
        let request = SynthesizeRequest {
            text: text.to_string(),
            language: language.code().to_string(),
        };

        let response = match self.synthesis.synthesize(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("synthesis request failed: {e}");
                return None;
            }
        };

        if !response.success {
            warn!("synthesis service declined to return audio");
            return None;
        }

        let encoded = match response.audio {
            Some(encoded) => encoded,
            None => {
                warn!("synthesis response carried no audio");
                return None;
            }
        };

        match BASE64.decode(encoded.as_bytes()) {
            Ok(audio) => Some(audio),
            Err(e) => {
                warn!("synthesized audio failed to decode: {e}");
                None
            }
        }
    }

    async fn speak_fallback(&self, text: &str, language: LanguageCode) -> PlaybackReport {
        let locale = fallback_locale(language);
        let voice = select_voice(&self.local.voices(), locale);

        debug!(
            locale,
            voice = voice.as_ref().map(|v| v.name.as_str()),
            "using local synthesis fallback"
        );

        let request = LocalSpeech {
            text: text.to_string(),
            locale: locale.to_string(),
            rate: LOCAL_FALLBACK_RATE,
            pitch: LOCAL_FALLBACK_PITCH,
            voice,
        };

        let error = self.local.speak(request).await.err().map(|e| e.to_string());
        if let Some(error) = &error {
            warn!("local synthesis error: {error}");
        }

        PlaybackReport {
            route: PlaybackRoute::LocalFallback,
            error,
        }
    }
}
