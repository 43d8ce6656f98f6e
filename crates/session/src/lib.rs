//! Voice session state machine
//!
//! Orchestrates speech capture, transcript aggregation, reply generation,
//! and playback behind a small set of states with guarded transitions.
//! Every external event checks the current state first and is a no-op when
//! the action is invalid, so late completions from in-flight requests
//! cannot corrupt a session that has moved on.

pub mod event;
pub mod machine;
pub mod state;
pub mod status;

pub use event::SessionEvent;
pub use machine::{SessionBackends, SessionConfig, VoiceSession, STOP_SETTLE_DELAY_MS};
pub use state::SessionState;
pub use status::SessionStatus;
