//! Transcript aggregation for recognition output
//!
//! The recognizer emits finalized segments interleaved with unstable
//! interim fragments. Finalized segments accumulate in arrival order;
//! only the most recent interim fragment is kept, for live display.

/// Aggregates recognition segments into a working transcript
#[derive(Debug, Default)]
pub struct TranscriptAggregator {
    /// Finalized segments in arrival order
    finals: Vec<String>,
    /// Trailing interim fragment, display only
    interim: Option<String>,
}

impl TranscriptAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all finalized segments and interim state
    pub fn reset(&mut self) {
        self.finals.clear();
        self.interim = None;
    }

    /// Append a finalized segment
    ///
    /// The interim fragment is dropped: the engine finalizes the text it
    /// was previously reporting as unstable.
    pub fn on_final(&mut self, text: &str) {
        self.finals.push(text.to_string());
        self.interim = None;
    }

    /// Replace the trailing interim fragment
    pub fn on_interim(&mut self, text: &str) {
        self.interim = Some(text.to_string());
    }

    /// Finalized segments joined by single spaces, trimmed
    ///
    /// This is what is passed downstream to reply generation.
    pub fn final_transcript(&self) -> String {
        self.finals.join(" ").trim().to_string()
    }

    /// Live display transcript: the finalized text plus the trailing
    /// interim fragment
    pub fn current_transcript(&self) -> String {
        let mut text = self.final_transcript();
        if let Some(interim) = &self.interim {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(interim);
        }
        text.trim().to_string()
    }
}
