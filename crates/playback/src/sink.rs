//! Audio output seam

use async_trait::async_trait;

use crate::PlaybackError;

/// Plays decoded audio and resolves when playback ends
///
/// Implementations resolve on playback end and return `Err` on a playback
/// error; callers treat both as completion.
#[async_trait]
pub trait AudioSink: Send + Sync {
    async fn play(&self, audio: Vec<u8>) -> Result<(), PlaybackError>;
}
