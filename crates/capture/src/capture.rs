//! Capture lifecycle and transient-error suppression

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use voice_assist_core::LanguageCode;

use crate::recognition::{RecognitionEngine, RecognitionEvent, RecognitionProvider};
use crate::CaptureError;

/// Channel capacity for capture events
const CAPTURE_CHANNEL_CAPACITY: usize = 64;

/// Event forwarded to the session layer
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// Interim segment for live display
    Interim(String),
    /// Finalized segment
    Final(String),
    /// Recoverable recognition fault (non-transient codes only)
    Fault(String),
}

/// Speech capture front-end
///
/// Owns at most one engine instance. Recognition language cannot change on
/// a running instance, so every start builds a freshly configured engine
/// and replaces any prior one.
pub struct SpeechCapture {
    provider: Arc<dyn RecognitionProvider>,
    engine: Mutex<Option<Box<dyn RecognitionEngine>>>,
}

impl SpeechCapture {
    pub fn new(provider: Arc<dyn RecognitionProvider>) -> Self {
        Self {
            provider,
            engine: Mutex::new(None),
        }
    }

    /// Begin continuous capture for the given language
    ///
    /// Transient engine faults are suppressed here; everything else is
    /// forwarded on the returned channel. Must be called from within a
    /// tokio runtime.
    pub fn start(
        &self,
        language: LanguageCode,
    ) -> Result<mpsc::Receiver<CaptureEvent>, CaptureError> {
        let mut engine = self.provider.create(language.recognition_locale())?;

        let (raw_tx, mut raw_rx) = mpsc::channel(CAPTURE_CHANNEL_CAPACITY);
        let (tx, rx) = mpsc::channel(CAPTURE_CHANNEL_CAPACITY);

        engine.start(raw_tx)?;

        // Exactly one engine exists at a time; any prior instance is
        // dropped here and its forwarding task winds down with it.
        *self.engine.lock() = Some(engine);

        tokio::spawn(async move {
            while let Some(event) = raw_rx.recv().await {
                let forwarded = match event {
                    RecognitionEvent::Interim(text) => Some(CaptureEvent::Interim(text)),
                    RecognitionEvent::Final(text) => Some(CaptureEvent::Final(text)),
                    RecognitionEvent::Error(fault) if fault.is_transient() => {
                        debug!(?fault, "suppressed transient recognition fault");
                        None
                    }
                    RecognitionEvent::Error(fault) => Some(CaptureEvent::Fault(fault.message())),
                };

                if let Some(event) = forwarded {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }

    /// End capture; trailing events may still arrive on the channel
    pub fn stop(&self) {
        if let Some(engine) = self.engine.lock().as_mut() {
            engine.stop();
        }
    }

    /// Is an engine instance currently held?
    pub fn has_engine(&self) -> bool {
        self.engine.lock().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::RecognitionFault;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::timeout;

    /// Engine that hands its event sender to the test
    struct TestEngine {
        slot: Arc<Mutex<Option<mpsc::Sender<RecognitionEvent>>>>,
        stopped: Arc<AtomicUsize>,
    }

    impl RecognitionEngine for TestEngine {
        fn start(&mut self, events: mpsc::Sender<RecognitionEvent>) -> Result<(), CaptureError> {
            *self.slot.lock() = Some(events);
            Ok(())
        }

        fn stop(&mut self) {
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct TestProvider {
        slot: Arc<Mutex<Option<mpsc::Sender<RecognitionEvent>>>>,
        stopped: Arc<AtomicUsize>,
        created: AtomicUsize,
        last_locale: Mutex<String>,
    }

    impl TestProvider {
        fn new() -> Self {
            Self {
                slot: Arc::new(Mutex::new(None)),
                stopped: Arc::new(AtomicUsize::new(0)),
                created: AtomicUsize::new(0),
                last_locale: Mutex::new(String::new()),
            }
        }

        fn sender(&self) -> mpsc::Sender<RecognitionEvent> {
            self.slot.lock().clone().expect("engine not started")
        }
    }

    impl RecognitionProvider for TestProvider {
        fn create(&self, locale: &str) -> Result<Box<dyn RecognitionEngine>, CaptureError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            *self.last_locale.lock() = locale.to_string();
            Ok(Box::new(TestEngine {
                slot: Arc::clone(&self.slot),
                stopped: Arc::clone(&self.stopped),
            }))
        }
    }

    async fn next_event(rx: &mut mpsc::Receiver<CaptureEvent>) -> Option<CaptureEvent> {
        timeout(Duration::from_millis(200), rx.recv())
            .await
            .ok()
            .flatten()
    }

    #[tokio::test]
    async fn test_segments_are_forwarded_in_order() {
        let provider = Arc::new(TestProvider::new());
        let capture = SpeechCapture::new(provider.clone());

        let mut rx = capture.start(LanguageCode::EnUs).unwrap();
        let tx = provider.sender();

        tx.send(RecognitionEvent::Interim("more".into())).await.unwrap();
        tx.send(RecognitionEvent::Final("More tea".into())).await.unwrap();

        assert!(matches!(next_event(&mut rx).await, Some(CaptureEvent::Interim(t)) if t == "more"));
        assert!(matches!(next_event(&mut rx).await, Some(CaptureEvent::Final(t)) if t == "More tea"));
    }

    #[tokio::test]
    async fn test_transient_faults_are_suppressed() {
        let provider = Arc::new(TestProvider::new());
        let capture = SpeechCapture::new(provider.clone());

        let mut rx = capture.start(LanguageCode::EnUs).unwrap();
        let tx = provider.sender();

        tx.send(RecognitionEvent::Error(RecognitionFault::Aborted)).await.unwrap();
        tx.send(RecognitionEvent::Error(RecognitionFault::NoSpeech)).await.unwrap();
        tx.send(RecognitionEvent::Final("still here".into())).await.unwrap();

        // Only the finalized segment comes through.
        assert!(matches!(next_event(&mut rx).await, Some(CaptureEvent::Final(t)) if t == "still here"));
    }

    #[tokio::test]
    async fn test_other_faults_surface_as_recoverable() {
        let provider = Arc::new(TestProvider::new());
        let capture = SpeechCapture::new(provider.clone());

        let mut rx = capture.start(LanguageCode::EnUs).unwrap();
        let tx = provider.sender();

        tx.send(RecognitionEvent::Error(RecognitionFault::Other("network".into())))
            .await
            .unwrap();

        assert!(
            matches!(next_event(&mut rx).await, Some(CaptureEvent::Fault(m)) if m.contains("network"))
        );
    }

    #[tokio::test]
    async fn test_start_replaces_prior_engine() {
        let provider = Arc::new(TestProvider::new());
        let capture = SpeechCapture::new(provider.clone());

        let _rx1 = capture.start(LanguageCode::EnUs).unwrap();
        let _rx2 = capture.start(LanguageCode::HiIn).unwrap();

        assert_eq!(provider.created.load(Ordering::SeqCst), 2);
        assert!(capture.has_engine());
    }

    #[tokio::test]
    async fn test_recognition_locale_is_used() {
        let provider = Arc::new(TestProvider::new());
        let capture = SpeechCapture::new(provider.clone());

        let _rx = capture.start(LanguageCode::RajIn).unwrap();
        assert_eq!(*provider.last_locale.lock(), "hi-IN");
    }

    #[tokio::test]
    async fn test_stop_reaches_engine() {
        let provider = Arc::new(TestProvider::new());
        let capture = SpeechCapture::new(provider.clone());

        let _rx = capture.start(LanguageCode::EnUs).unwrap();
        capture.stop();

        assert_eq!(provider.stopped.load(Ordering::SeqCst), 1);
    }
}
