//! Session events

use voice_assist_core::{ConversationEntry, ResponseOption};
use voice_assist_playback::PlaybackRoute;

use crate::state::SessionState;
use crate::status::SessionStatus;

/// Event broadcast to session subscribers
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// State transition
    StateChanged {
        from: SessionState,
        to: SessionState,
    },
    /// Status line update
    Status(SessionStatus),
    /// Working transcript changed (interim text included)
    TranscriptChanged(String),
    /// Reply options are ready for selection
    OptionsReady {
        options: Vec<ResponseOption>,
        fallback: bool,
    },
    /// A turn was appended to the conversation log
    EntryLogged(ConversationEntry),
    /// Playback resolved, successfully or not
    PlaybackFinished(PlaybackRoute),
}
