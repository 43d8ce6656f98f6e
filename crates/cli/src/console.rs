//! Console stand-ins for the platform capabilities
//!
//! The harness has no microphone or speaker: typed lines stand in for
//! recognized speech, network audio is written to a file, and the local
//! fallback voice prints to the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::info;

use voice_assist_capture::{
    CaptureError, RecognitionEngine, RecognitionEvent, RecognitionFault, RecognitionProvider,
};
use voice_assist_playback::{AudioSink, LocalSpeech, LocalSynthesizer, LocalVoice, PlaybackError};

/// Recognition provider that finalizes one queued utterance per recording
pub struct ConsoleRecognitionProvider {
    next: Arc<Mutex<Option<String>>>,
}

impl ConsoleRecognitionProvider {
    pub fn new() -> Self {
        Self {
            next: Arc::new(Mutex::new(None)),
        }
    }

    /// Queue the utterance the next recording will "hear"
    pub fn queue_utterance(&self, text: &str) {
        *self.next.lock() = Some(text.to_string());
    }
}

impl Default for ConsoleRecognitionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognitionProvider for ConsoleRecognitionProvider {
    fn create(&self, locale: &str) -> Result<Box<dyn RecognitionEngine>, CaptureError> {
        info!(locale, "console recognizer configured");
        Ok(Box::new(ConsoleRecognizer {
            next: Arc::clone(&self.next),
        }))
    }
}

struct ConsoleRecognizer {
    next: Arc<Mutex<Option<String>>>,
}

impl RecognitionEngine for ConsoleRecognizer {
    fn start(&mut self, events: mpsc::Sender<RecognitionEvent>) -> Result<(), CaptureError> {
        let event = match self.next.lock().take() {
            Some(text) => RecognitionEvent::Final(text),
            None => RecognitionEvent::Error(RecognitionFault::NoSpeech),
        };

        events
            .try_send(event)
            .map_err(|e| CaptureError::Engine(e.to_string()))
    }

    fn stop(&mut self) {}
}

/// Sink that writes network audio to a file instead of a device
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl AudioSink for FileSink {
    async fn play(&self, audio: Vec<u8>) -> Result<(), PlaybackError> {
        tokio::fs::write(&self.path, &audio)
            .await
            .map_err(|e| PlaybackError::Sink(e.to_string()))?;

        info!(path = %self.path.display(), bytes = audio.len(), "reply audio written");
        println!("[audio] {} bytes -> {}", audio.len(), self.path.display());
        Ok(())
    }
}

/// Fallback voice that prints to the terminal
pub struct ConsoleSynthesizer;

#[async_trait]
impl LocalSynthesizer for ConsoleSynthesizer {
    fn voices(&self) -> Vec<LocalVoice> {
        Vec::new()
    }

    async fn speak(&self, request: LocalSpeech) -> Result<(), PlaybackError> {
        println!("[{} voice] {}", request.locale, request.text);
        Ok(())
    }
}
