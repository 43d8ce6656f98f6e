//! Language selections and locale mapping
//!
//! Four selectable languages. Rajasthani has no native recognition support
//! and is captured with the Hindi recognizer, but keeps its own code through
//! the generation and synthesis requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A selectable language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LanguageCode {
    /// English (US)
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// Hindi (India)
    #[serde(rename = "hi-IN")]
    HiIn,
    /// Tamil (India)
    #[serde(rename = "ta-IN")]
    TaIn,
    /// Rajasthani (India)
    #[serde(rename = "raj-IN")]
    RajIn,
}

impl LanguageCode {
    /// BCP-47 code carried through generation and synthesis requests
    pub fn code(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::HiIn => "hi-IN",
            Self::TaIn => "ta-IN",
            Self::RajIn => "raj-IN",
        }
    }

    /// Locale handed to the recognition engine
    ///
    /// Rajasthani is recognized with the Hindi locale.
    pub fn recognition_locale(&self) -> &'static str {
        match self {
            Self::RajIn => "hi-IN",
            other => other.code(),
        }
    }

    /// Human-readable name for status text
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::EnUs => "English",
            Self::HiIn => "Hindi",
            Self::TaIn => "Tamil",
            Self::RajIn => "Rajasthani",
        }
    }

    /// All selectable languages, in display order
    pub fn all() -> [LanguageCode; 4] {
        [Self::EnUs, Self::HiIn, Self::TaIn, Self::RajIn]
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en-US" => Ok(Self::EnUs),
            "hi-IN" => Ok(Self::HiIn),
            "ta-IN" => Ok(Self::TaIn),
            "raj-IN" => Ok(Self::RajIn),
            other => Err(Error::UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
