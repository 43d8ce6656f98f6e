//! Local synthesis fallback and voice selection
//!
//! The voice-name heuristic is best-effort and platform-dependent. When no
//! matching voice is found, no explicit voice is passed and the engine
//! default for the locale applies.

use async_trait::async_trait;

use voice_assist_core::LanguageCode;

use crate::PlaybackError;

/// Normal speaking pace for the fallback voice
pub const LOCAL_FALLBACK_RATE: f32 = 1.0;

/// Raised above neutral to approximate a youthful persona voice
pub const LOCAL_FALLBACK_PITCH: f32 = 1.3;

/// A voice reported by the local synthesis engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVoice {
    /// Engine-reported voice name
    pub name: String,
    /// BCP-47 language tag
    pub language: String,
}

/// A local synthesis request
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSpeech {
    pub text: String,
    pub locale: String,
    pub rate: f32,
    pub pitch: f32,
    /// Explicit voice choice; `None` selects the engine default
    pub voice: Option<LocalVoice>,
}

/// Local synthesis capability
#[async_trait]
pub trait LocalSynthesizer: Send + Sync {
    /// Enumerate available voices
    fn voices(&self) -> Vec<LocalVoice>;

    /// Speak the request, resolving on completion or error
    async fn speak(&self, request: LocalSpeech) -> Result<(), PlaybackError>;
}

/// Locale used for fallback synthesis of the given language
///
/// Hindi and Rajasthani map to the Hindi locale, Tamil to the Tamil
/// locale, anything else to Indian English.
pub fn fallback_locale(language: LanguageCode) -> &'static str {
    match language {
        LanguageCode::HiIn | LanguageCode::RajIn => "hi-IN",
        LanguageCode::TaIn => "ta-IN",
        LanguageCode::EnUs => "en-IN",
    }
}

/// Pick a voice for the target locale
///
/// Among voices whose language tag's primary subtag matches the target's,
/// prefer one whose name carries a female-indicating token; otherwise
/// return `None` so the engine default applies.
pub fn select_voice(voices: &[LocalVoice], locale: &str) -> Option<LocalVoice> {
    let primary = primary_subtag(locale);

    voices
        .iter()
        .filter(|voice| primary_subtag(&voice.language).eq_ignore_ascii_case(primary))
        .find(|voice| {
            let name = voice.name.to_lowercase();
            name.contains("female") || name.contains("woman")
        })
        .cloned()
}

fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}
