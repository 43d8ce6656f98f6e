//! Session state machine
//!
//! Single-owner state with guarded transitions. All shared state is touched
//! from short non-awaiting critical sections; ordering is enforced purely
//! by the state guards, so an in-flight request that resolves after the
//! session has moved on becomes a no-op.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use voice_assist_capture::{CaptureEvent, RecognitionProvider, SpeechCapture};
use voice_assist_core::{
    ConversationEntry, ConversationLog, LanguageCode, ResponseOption, TranscriptAggregator,
};
use voice_assist_generate::{GenerateBackend, GeneratedReplies, ResponseOrchestrator};
use voice_assist_playback::{AudioSink, LocalSynthesizer, PlaybackEngine, SynthesisBackend};

use crate::event::SessionEvent;
use crate::state::SessionState;
use crate::status::SessionStatus;

/// Settle delay between capture-stop and transcript finalization, in
/// milliseconds
///
/// Heuristic buffer that admits trailing finalized recognition events
/// before the utterance is evaluated; not a correctness guarantee.
pub const STOP_SETTLE_DELAY_MS: u64 = 300;

/// Broadcast capacity for session events
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Active language at session start
    pub language: LanguageCode,
    /// Persona label used for spoken turns
    pub persona_name: String,
    /// Patron label used for captured turns
    pub patron_label: String,
    /// Settle delay between capture-stop and finalization
    pub settle_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: LanguageCode::EnUs,
            persona_name: "Pooja".to_string(),
            patron_label: "Patron".to_string(),
            settle_delay: Duration::from_millis(STOP_SETTLE_DELAY_MS),
        }
    }
}

/// External capabilities wired into a session
pub struct SessionBackends {
    pub recognition: Arc<dyn RecognitionProvider>,
    pub generate: Arc<dyn GenerateBackend>,
    pub synthesis: Arc<dyn SynthesisBackend>,
    pub sink: Arc<dyn AudioSink>,
    pub local_synthesis: Arc<dyn LocalSynthesizer>,
}

/// Voice session state machine
pub struct VoiceSession {
    config: SessionConfig,
    state: Mutex<SessionState>,
    status: Mutex<SessionStatus>,
    language: Mutex<LanguageCode>,
    aggregator: Mutex<TranscriptAggregator>,
    options: Mutex<Vec<ResponseOption>>,
    log: ConversationLog,
    capture: SpeechCapture,
    orchestrator: ResponseOrchestrator,
    playback: PlaybackEngine,
    /// Capture epoch; events from a replaced engine are ignored
    epoch: Mutex<u64>,
    event_tx: broadcast::Sender<SessionEvent>,
    /// Self-handle for the capture pump task
    weak: Weak<VoiceSession>,
}

impl VoiceSession {
    pub fn new(config: SessionConfig, backends: SessionBackends) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Arc::new_cyclic(|weak| Self {
            state: Mutex::new(SessionState::Idle),
            status: Mutex::new(SessionStatus::Ready),
            language: Mutex::new(config.language),
            aggregator: Mutex::new(TranscriptAggregator::new()),
            options: Mutex::new(Vec::new()),
            log: ConversationLog::new(),
            capture: SpeechCapture::new(backends.recognition),
            orchestrator: ResponseOrchestrator::new(backends.generate),
            playback: PlaybackEngine::new(
                backends.synthesis,
                backends.sink,
                backends.local_synthesis,
            ),
            epoch: Mutex::new(0),
            event_tx,
            weak: weak.clone(),
            config,
        })
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Latest status line
    pub fn status(&self) -> SessionStatus {
        self.status.lock().clone()
    }

    /// Active language
    pub fn language(&self) -> LanguageCode {
        *self.language.lock()
    }

    /// Ordered snapshot of the conversation log
    pub fn conversation(&self) -> Vec<ConversationEntry> {
        self.log.all()
    }

    /// Reply options pending selection, if any
    pub fn options(&self) -> Vec<ResponseOption> {
        self.options.lock().clone()
    }

    /// Working transcript including any interim fragment
    pub fn transcript(&self) -> String {
        self.aggregator.lock().current_transcript()
    }

    /// Switch the active language; only valid while idle
    pub fn set_language(&self, language: LanguageCode) {
        if *self.state.lock() != SessionState::Idle {
            self.set_status(SessionStatus::NotReady);
            return;
        }

        *self.language.lock() = language;
        info!(language = language.code(), "language selected");
    }

    /// Empty the conversation log
    pub fn clear_conversation(&self) {
        self.log.clear();
        info!("conversation cleared");
    }

    /// Begin a recording cycle; valid only from `Idle`
    ///
    /// A capture-start while the persona is speaking is rejected with a
    /// busy status and starts no recognition instance.
    pub fn start_recording(&self) {
        match *self.state.lock() {
            SessionState::Idle => {}
            SessionState::Speaking => {
                debug!("capture-start rejected while speaking");
                self.set_status(SessionStatus::Busy);
                return;
            }
            _ => {
                self.set_status(SessionStatus::NotReady);
                return;
            }
        }

        // A fresh cycle discards the prior utterance and any pending
        // options, regardless of prior session content.
        self.aggregator.lock().reset();
        self.options.lock().clear();
        self.emit(SessionEvent::TranscriptChanged(String::new()));

        let epoch = {
            let mut epoch = self.epoch.lock();
            *epoch += 1;
            *epoch
        };

        let language = *self.language.lock();
        let mut events = match self.capture.start(language) {
            Ok(events) => events,
            Err(e) => {
                warn!("failed to start recognition: {e}");
                self.set_status(SessionStatus::RecognitionFault(e.to_string()));
                return;
            }
        };

        self.transition(SessionState::Recording);
        self.set_status(SessionStatus::Listening);

        let session = self.weak.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let Some(session) = session.upgrade() else {
                    break;
                };
                session.handle_capture_event(epoch, event);
            }
        });
    }

    /// Stop the current recording cycle; valid only from `Recording`
    ///
    /// After the settle delay, a non-empty utterance dispatches generation;
    /// an empty one returns the session to idle with a distinct status.
    pub async fn stop_recording(&self) {
        if *self.state.lock() != SessionState::Recording {
            self.set_status(SessionStatus::NotReady);
            return;
        }

        self.capture.stop();

        // Trailing finalized events are still admitted while settling.
        tokio::time::sleep(self.config.settle_delay).await;

        if *self.state.lock() != SessionState::Recording {
            // A concurrent stop already finalized this cycle.
            return;
        }

        let utterance = self.aggregator.lock().final_transcript();

        if utterance.is_empty() {
            self.transition(SessionState::Idle);
            self.set_status(SessionStatus::NoSpeechDetected);
            return;
        }

        self.transition(SessionState::Processing);
        self.set_status(SessionStatus::Generating);

        // History covers the log before the utterance being answered.
        let history = self.log.history();
        let language = *self.language.lock();

        match self
            .orchestrator
            .request_replies(&utterance, history, language)
            .await
        {
            Ok(replies) => self.on_replies(utterance, replies),
            Err(e) => {
                warn!("reply generation failed: {e}");
                if *self.state.lock() == SessionState::Processing {
                    self.transition(SessionState::Idle);
                    self.set_status(SessionStatus::GenerationFailed);
                }
            }
        }
    }

    /// Voice the chosen reply; valid only from `AwaitingSelection`
    ///
    /// Options are cleared as soon as one is chosen and the persona turn is
    /// logged on selection, not gated on playback success. The session
    /// always returns to idle when playback resolves.
    pub async fn select_option(&self, index: usize) {
        let option = {
            if *self.state.lock() != SessionState::AwaitingSelection {
                self.set_status(SessionStatus::NotReady);
                return;
            }

            let mut options = self.options.lock();
            match options.get(index).cloned() {
                Some(option) => {
                    options.clear();
                    option
                }
                None => {
                    warn!(index, "selection index out of range");
                    self.set_status(SessionStatus::NotReady);
                    return;
                }
            }
        };

        self.transition(SessionState::Speaking);
        self.set_status(SessionStatus::Speaking);

        let entry = ConversationEntry::persona(
            &self.config.persona_name,
            &option.tone,
            option.response.clone(),
        );
        self.log.append(entry.clone());
        self.emit(SessionEvent::EntryLogged(entry));

        let language = *self.language.lock();
        let report = self.playback.speak(&option.response, language).await;

        self.emit(SessionEvent::PlaybackFinished(report.route));

        // Playback never leaves the machine stuck; a resolution arriving
        // after the session moved on is a no-op.
        if *self.state.lock() == SessionState::Speaking {
            self.transition(SessionState::Idle);
            self.set_status(SessionStatus::Ready);
        }
    }

    /// Apply one capture event; no-op outside `Recording` or for a stale
    /// epoch
    fn handle_capture_event(&self, epoch: u64, event: CaptureEvent) {
        if *self.epoch.lock() != epoch {
            debug!("dropping capture event from a replaced engine");
            return;
        }

        if *self.state.lock() != SessionState::Recording {
            return;
        }

        match event {
            CaptureEvent::Final(text) => {
                let transcript = {
                    let mut aggregator = self.aggregator.lock();
                    aggregator.on_final(&text);
                    aggregator.current_transcript()
                };
                self.emit(SessionEvent::TranscriptChanged(transcript));
            }
            CaptureEvent::Interim(text) => {
                let transcript = {
                    let mut aggregator = self.aggregator.lock();
                    aggregator.on_interim(&text);
                    aggregator.current_transcript()
                };
                self.emit(SessionEvent::TranscriptChanged(transcript));
            }
            CaptureEvent::Fault(message) => {
                // Recoverable: status only, no transition.
                self.set_status(SessionStatus::RecognitionFault(message));
            }
        }
    }

    /// Accept validated replies; no-op if the session left `Processing`
    fn on_replies(&self, utterance: String, replies: GeneratedReplies) {
        if *self.state.lock() != SessionState::Processing {
            debug!("dropping late generation result");
            return;
        }

        let entry = ConversationEntry::patron(&self.config.patron_label, utterance);
        self.log.append(entry.clone());
        self.emit(SessionEvent::EntryLogged(entry));

        *self.options.lock() = replies.options.clone();

        self.transition(SessionState::AwaitingSelection);
        self.set_status(SessionStatus::RepliesReady {
            fallback: replies.fallback,
        });
        self.emit(SessionEvent::OptionsReady {
            options: replies.options,
            fallback: replies.fallback,
        });
    }

    fn transition(&self, to: SessionState) {
        let from = {
            let mut state = self.state.lock();
            std::mem::replace(&mut *state, to)
        };

        if from != to {
            debug!(?from, ?to, "state transition");
            self.emit(SessionEvent::StateChanged { from, to });
        }
    }

    fn set_status(&self, status: SessionStatus) {
        *self.status.lock() = status.clone();
        self.emit(SessionEvent::Status(status));
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.event_tx.send(event);
    }
}
