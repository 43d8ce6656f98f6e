//! Conversation log types
//!
//! An append-only ordered record of patron and persona turns. Entries are
//! immutable once appended; the log is only emptied through an explicit
//! `clear`.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// A single conversation turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationEntry {
    /// Speaker label; persona turns are annotated with the chosen tone
    pub role: String,
    /// Turn text
    pub text: String,
    /// When the turn was appended
    pub timestamp: DateTime<Utc>,
}

impl ConversationEntry {
    /// A patron turn
    pub fn patron(label: &str, text: impl Into<String>) -> Self {
        Self {
            role: label.to_string(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// A persona turn annotated with the chosen tone
    pub fn persona(name: &str, tone: &str, text: impl Into<String>) -> Self {
        Self {
            role: format!("{name} ({tone})"),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Wire-format history item sent with generation requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryItem {
    pub role: String,
    pub text: String,
}

impl From<&ConversationEntry> for HistoryItem {
    fn from(entry: &ConversationEntry) -> Self {
        Self {
            role: entry.role.clone(),
            text: entry.text.clone(),
        }
    }
}

/// Append-only conversation log
#[derive(Debug, Default)]
pub struct ConversationLog {
    entries: RwLock<Vec<ConversationEntry>>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the end of the log
    pub fn append(&self, entry: ConversationEntry) {
        self.entries.write().push(entry);
    }

    /// Atomically empty the log
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Ordered snapshot of all turns
    pub fn all(&self) -> Vec<ConversationEntry> {
        self.entries.read().clone()
    }

    /// Wire-format history for generation requests
    pub fn history(&self) -> Vec<HistoryItem> {
        self.entries.read().iter().map(HistoryItem::from).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
