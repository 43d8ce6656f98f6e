//! Core types for the voice assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Language selections and locale mapping
//! - Transcript aggregation from interim/final recognition segments
//! - The append-only conversation log
//! - Generated reply options

pub mod conversation;
pub mod error;
pub mod language;
pub mod reply;
pub mod transcript;

pub use conversation::{ConversationEntry, ConversationLog, HistoryItem};
pub use error::{Error, Result};
pub use language::LanguageCode;
pub use reply::{ResponseOption, RESPONSE_OPTION_COUNT};
pub use transcript::TranscriptAggregator;
