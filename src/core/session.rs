//! Interactive journaling session.
//!
//! Each iteration: listen (with bounded retry) → moderate → score →
//! classify → append → report statistics. The loop only observes
//! cancellation at the top of an iteration and while waiting for speech;
//! once text is in hand the entry is analyzed and persisted to completion.
//!
//! Progress is published as `SessionEvent`s so rendering stays outside the
//! loop.

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::adapters::{Transcriber, TranscriptionError};
use crate::config::SessionSettings;
use crate::domain::{Entry, Mood};

use super::analyzer::{Analysis, Analyzer};
use super::journal_store::JournalStore;
use super::retry::{retry, RetryOutcome};
use super::stats::{summarize, Summary};

/// Something the user should hear about
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Waiting for an utterance
    Listening { attempt: u32, max_attempts: u32 },

    /// One attempt produced no text
    TranscriptionFailed { attempt: u32, error: TranscriptionError },

    /// Every attempt failed; no entry this iteration
    GaveUp { attempts: u32 },

    /// Utterance matched a banned term (text deliberately omitted)
    Blocked,

    /// Utterance passed moderation and was classified
    Classified { text: String, score: f64, mood: Mood },

    /// Entry persisted
    Saved { mood: Mood },

    /// Entry could not be persisted
    SaveFailed { mood: Mood, error: String },

    /// Statistics over the whole journal
    Stats(Summary),

    /// Journal could not be read for statistics
    StatsUnavailable { error: String },

    /// Loop finished; nothing is in flight
    Stopped { reason: StopReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// User interrupt
    Cancelled,

    /// Transcriber has no more input
    InputClosed,
}

/// Counters for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub utterances: usize,
    pub saved: usize,
    pub failed_saves: usize,
    pub given_up: usize,
}

/// What one pass through the loop produced
enum Step {
    Processed { saved: bool },
    GaveUp,
    Stop(StopReason),
}

/// Sequential journaling loop
pub struct Session {
    transcriber: Box<dyn Transcriber>,
    analyzer: Analyzer,
    store: JournalStore,
    settings: SessionSettings,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl Session {
    /// Create a session and the receiver for its events
    pub fn new(
        transcriber: Box<dyn Transcriber>,
        analyzer: Analyzer,
        store: JournalStore,
        settings: SessionSettings,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let session = Self {
            transcriber,
            analyzer,
            store,
            settings,
            events,
        };
        (session, rx)
    }

    /// Run until `shutdown` flips to `true` or the input closes.
    ///
    /// The event channel closes when this returns.
    #[instrument(skip_all, fields(transcriber = %self.transcriber.name()))]
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> SessionReport {
        let mut report = SessionReport::default();
        info!("Session started");

        let reason = loop {
            if *shutdown.borrow_and_update() {
                break StopReason::Cancelled;
            }

            // Only listening is cancellable; a recorded utterance is always persisted
            let outcome = tokio::select! {
                biased;
                _ = cancelled(&mut shutdown) => None,
                outcome = self.acquire() => Some(outcome),
            };
            let Some(outcome) = outcome else {
                break StopReason::Cancelled;
            };

            let step = self.settle(outcome).await;

            match step {
                Step::Processed { saved } => {
                    report.utterances += 1;
                    if saved {
                        report.saved += 1;
                    } else {
                        report.failed_saves += 1;
                    }
                    self.report_stats().await;
                }
                Step::GaveUp => {
                    report.given_up += 1;
                    self.report_stats().await;
                }
                Step::Stop(reason) => break reason,
            }
        };

        info!(?reason, saved = report.saved, "Session stopped");
        self.emit(SessionEvent::Stopped { reason });
        report
    }

    /// Analyze and persist acquired text, or account for a failed acquisition
    async fn settle(&self, outcome: RetryOutcome<String, TranscriptionError>) -> Step {
        match outcome {
            RetryOutcome::Succeeded { value: text, .. } => {
                let saved = self.record(&text).await;
                Step::Processed { saved }
            }
            RetryOutcome::Exhausted { attempts, .. } => {
                warn!(attempts, "Giving up on this utterance");
                self.emit(SessionEvent::GaveUp { attempts });
                Step::GaveUp
            }
            RetryOutcome::Aborted { error, .. } => {
                debug!(%error, "Transcriber stopped");
                Step::Stop(StopReason::InputClosed)
            }
        }
    }

    async fn acquire(&self) -> RetryOutcome<String, TranscriptionError> {
        let policy = self.settings.retry;
        let limits = self.settings.listen;

        retry(
            &policy,
            |attempt| {
                self.emit(SessionEvent::Listening {
                    attempt,
                    max_attempts: policy.max_attempts.max(1),
                });
                self.transcriber.transcribe(limits)
            },
            TranscriptionError::is_retryable,
            |attempt, error| {
                if error.is_retryable() {
                    warn!(attempt, %error, "Transcription attempt failed");
                    self.emit(SessionEvent::TranscriptionFailed {
                        attempt,
                        error: error.clone(),
                    });
                }
            },
        )
        .await
    }

    /// Analyze and persist one utterance. Returns whether it was saved.
    #[instrument(skip_all)]
    async fn record(&self, text: &str) -> bool {
        let analysis = self.analyzer.analyze(text);

        match analysis {
            Analysis::Blocked => {
                info!("Utterance blocked by moderation");
                self.emit(SessionEvent::Blocked);
            }
            Analysis::Scored { score, mood } => {
                info!(%mood, score, "Utterance classified");
                self.emit(SessionEvent::Classified {
                    text: text.to_string(),
                    score,
                    mood,
                });
            }
        }

        let mood = analysis.mood();
        let entry = Entry::now(text, mood);

        match self.store.append(&entry).await {
            Ok(()) => {
                self.emit(SessionEvent::Saved { mood });
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to save journal entry");
                self.emit(SessionEvent::SaveFailed {
                    mood,
                    error: e.to_string(),
                });
                false
            }
        }
    }

    async fn report_stats(&self) {
        match self.store.read_all().await {
            Ok(entries) => self.emit(SessionEvent::Stats(summarize(&entries))),
            Err(e) => {
                warn!(error = %e, "Statistics unavailable");
                self.emit(SessionEvent::StatsUnavailable {
                    error: e.to_string(),
                });
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        // A dropped receiver only means nobody is rendering
        let _ = self.events.send(event);
    }
}

/// Resolves once `shutdown` is `true`; never resolves if the sender is gone
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::adapters::ListenLimits;
    use crate::core::RetryPolicy;

    struct Scripted(Mutex<VecDeque<Result<String, TranscriptionError>>>);

    #[async_trait]
    impl Transcriber for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn transcribe(&self, _limits: ListenLimits) -> Result<String, TranscriptionError> {
            let next = self.0.lock().unwrap().pop_front();
            next.unwrap_or(Err(TranscriptionError::InputClosed))
        }
    }

    fn session(
        script: Vec<Result<String, TranscriptionError>>,
        temp: &TempDir,
    ) -> (Session, mpsc::UnboundedReceiver<SessionEvent>, JournalStore) {
        let store = JournalStore::new(temp.path().join("log.json"));
        let settings = SessionSettings {
            retry: RetryPolicy::attempts(3),
            listen: ListenLimits::default(),
        };
        let (session, rx) = Session::new(
            Box::new(Scripted(Mutex::new(script.into()))),
            Analyzer::default(),
            store.clone(),
            settings,
        );
        (session, rx, store)
    }

    fn drain(mut rx: mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_retry_then_save() {
        let temp = TempDir::new().unwrap();
        let (session, rx, store) = session(
            vec![
                Err(TranscriptionError::Unintelligible),
                Ok("Я сегодня счастлив и рад".to_string()),
            ],
            &temp,
        );
        let (_tx, shutdown) = watch::channel(false);

        let report = session.run(shutdown).await;
        assert_eq!(report.saved, 1);

        let entries = store.read_all().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, Mood::Positive);

        let events = drain(rx);
        assert!(events.contains(&SessionEvent::TranscriptionFailed {
            attempt: 1,
            error: TranscriptionError::Unintelligible
        }));
        assert!(events.contains(&SessionEvent::Saved { mood: Mood::Positive }));
        assert_eq!(
            events.last(),
            Some(&SessionEvent::Stopped { reason: StopReason::InputClosed })
        );
    }

    #[tokio::test]
    async fn test_gave_up_still_reports_stats() {
        let temp = TempDir::new().unwrap();
        let (session, rx, store) = session(
            vec![
                Err(TranscriptionError::Unintelligible),
                Err(TranscriptionError::Timeout(std::time::Duration::from_secs(5))),
                Err(TranscriptionError::Transport("device busy".to_string())),
            ],
            &temp,
        );
        let (_tx, shutdown) = watch::channel(false);

        let report = session.run(shutdown).await;
        assert_eq!(report.given_up, 1);
        assert_eq!(report.utterances, 0);
        assert!(store.read_all().await.unwrap().is_empty());

        let events = drain(rx);
        let gave_up = events
            .iter()
            .position(|e| *e == SessionEvent::GaveUp { attempts: 3 })
            .unwrap();
        assert_eq!(events[gave_up + 1], SessionEvent::Stats(Summary::default()));
    }

    #[tokio::test]
    async fn test_preset_shutdown_does_nothing() {
        let temp = TempDir::new().unwrap();
        let (session, rx, store) = session(vec![Ok("рад".to_string())], &temp);
        let (_tx, shutdown) = watch::channel(true);

        let report = session.run(shutdown).await;
        assert_eq!(report, SessionReport::default());
        assert!(store.read_all().await.unwrap().is_empty());
        assert_eq!(
            drain(rx),
            vec![SessionEvent::Stopped { reason: StopReason::Cancelled }]
        );
    }
}
