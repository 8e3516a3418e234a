//! Background analysis with supersession.
//!
//! Interactive callers (a configuration screen re-running detection as the
//! user edits options) submit each request to an [`AnalysisWorker`]. Every
//! submission starts a new generation and cancels the previous one, and a
//! finished analysis only publishes its result if it is still the newest
//! generation. Older results never overwrite newer ones.

use std::sync::{Arc, Mutex, PoisonError};

use sheetcade_spec::{AnalysisReport, DetectionOptions};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::analyze::{Analyzer, AnalyzerConfig};
use crate::buffer::PixelBuffer;
use crate::cancel::CancelToken;
use crate::error::AnalysisError;

/// A published analysis outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    /// Generation that produced this outcome.
    pub generation: u64,
    /// The analysis outcome.
    pub outcome: Result<AnalysisReport, AnalysisError>,
}

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The result was published.
    Published(u64),
    /// A newer submission arrived first; the result was discarded.
    Superseded(u64),
    /// The blocking task panicked.
    Failed(u64),
}

#[derive(Debug, Default)]
struct WorkerState {
    generation: u64,
    token: Option<CancelToken>,
}

/// Runs analyses on Tokio's blocking pool, keeping only the newest result.
#[derive(Debug, Clone)]
pub struct AnalysisWorker {
    analyzer: Analyzer,
    state: Arc<Mutex<WorkerState>>,
    results: watch::Sender<Option<Completed>>,
}

impl AnalysisWorker {
    /// Creates a worker.
    pub fn new(config: AnalyzerConfig) -> Self {
        let (results, _) = watch::channel(None);
        Self {
            analyzer: Analyzer::new(config),
            state: Arc::new(Mutex::new(WorkerState::default())),
            results,
        }
    }

    /// Receiver that always holds the newest published outcome.
    pub fn subscribe(&self) -> watch::Receiver<Option<Completed>> {
        self.results.subscribe()
    }

    /// The newest published outcome, if any.
    pub fn latest(&self) -> Option<Completed> {
        self.results.borrow().clone()
    }

    /// Cancels the in-flight analysis, if any, without starting a new one.
    pub fn cancel(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        if let Some(token) = state.token.take() {
            token.cancel();
        }
    }

    /// Starts analysing `buffer`, superseding any earlier submission.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(
        &self,
        buffer: Arc<PixelBuffer>,
        options: DetectionOptions,
    ) -> JoinHandle<Submission> {
        let token = CancelToken::new();
        let generation = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = state.token.replace(token.clone()) {
                previous.cancel();
            }
            state.generation += 1;
            state.generation
        };
        log::debug!("Submitting analysis generation {}", generation);

        let analyzer = self.analyzer;
        let state = Arc::clone(&self.state);
        let results = self.results.clone();

        tokio::spawn(async move {
            let joined =
                tokio::task::spawn_blocking(move || analyzer.run(&buffer, &options, &token))
                    .await;

            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("Analysis generation {} failed: {}", generation, e);
                    return Submission::Failed(generation);
                }
            };

            // Compare and publish under the lock so a newer submit cannot
            // slip in between.
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.generation != generation {
                log::debug!("Analysis generation {} superseded", generation);
                return Submission::Superseded(generation);
            }
            state.token = None;
            results.send_replace(Some(Completed {
                generation,
                outcome,
            }));
            Submission::Published(generation)
        })
    }
}

impl Default for AnalysisWorker {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
