//! Main settings module

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use voice_assist_core::LanguageCode;

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Service endpoints
    #[serde(default)]
    pub service: ServiceConfig,

    /// Session defaults
    #[serde(default)]
    pub session: SessionSettings,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Load settings from an optional file plus environment overrides
    ///
    /// Environment variables use the `VOICE_ASSIST` prefix with `__` as the
    /// section separator, e.g. `VOICE_ASSIST__SERVICE__GENERATE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("VOICE_ASSIST")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session
            .language
            .parse::<LanguageCode>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "session.language".to_string(),
                message: e.to_string(),
            })?;

        for (field, url) in [
            ("service.generate_url", &self.service.generate_url),
            ("service.synthesize_url", &self.service.synthesize_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("expected an http(s) URL, got '{url}'"),
                });
            }
        }

        if self.service.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "service.timeout_seconds".to_string(),
                message: "timeout must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }

    /// Parsed startup language
    pub fn language(&self) -> LanguageCode {
        self.session.language.parse().unwrap_or_default()
    }
}

/// Service endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Reply-generation endpoint
    #[serde(default = "default_generate_url")]
    pub generate_url: String,

    /// Speech-synthesis endpoint
    #[serde(default = "default_synthesize_url")]
    pub synthesize_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            generate_url: default_generate_url(),
            synthesize_url: default_synthesize_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Session defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Startup language code
    #[serde(default = "default_language")]
    pub language: String,

    /// Persona label used for spoken turns
    #[serde(default = "default_persona")]
    pub persona_name: String,

    /// Patron label used for captured turns
    #[serde(default = "default_patron")]
    pub patron_label: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            persona_name: default_persona(),
            patron_label: default_patron(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_generate_url() -> String {
    "http://localhost:8000/api/generate".to_string()
}

fn default_synthesize_url() -> String {
    "http://localhost:8000/api/tts".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_persona() -> String {
    "Pooja".to_string()
}

fn default_patron() -> String {
    "Patron".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();

        assert_eq!(settings.language(), LanguageCode::EnUs);
        assert_eq!(settings.session.persona_name, "Pooja");
        assert!(settings.service.generate_url.ends_with("/api/generate"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[service]
generate_url = "https://api.example.com/api/generate"
timeout_seconds = 10

[session]
language = "hi-IN"
persona_name = "Asha"
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.language(), LanguageCode::HiIn);
        assert_eq!(settings.session.persona_name, "Asha");
        assert_eq!(settings.service.timeout_seconds, 10);
        // Unset values keep their defaults.
        assert!(settings.service.synthesize_url.ends_with("/api/tts"));
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let settings = Settings {
            session: SessionSettings {
                language: "fr-FR".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "session.language"
        ));
    }

    #[test]
    fn test_non_http_url_is_rejected() {
        let settings = Settings {
            service: ServiceConfig {
                generate_url: "ftp://example.com".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let settings = Settings {
            service: ServiceConfig {
                timeout_seconds: 0,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(settings.validate().is_err());
    }
}
