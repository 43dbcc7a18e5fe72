//! Request/response boundary around the analysis functions
//!
//! [`WorkerState`] turns a [`Request`] into [`Response`]s and never lets an
//! error or panic escape: every failure becomes [`Response::Error`].
//! [`Worker`] runs a `WorkerState` on a dedicated thread so long analyses do
//! not block the caller.
//!
//! # Example
//!
//! ```
//! use spectra_dsp::worker::{Request, Response, Worker};
//!
//! let worker = Worker::spawn();
//! worker.send(Request::ProcessRealtime { samples: Some(vec![0.0; 2048]) })?;
//! match worker.recv() {
//!     Some(Response::RealtimeFrame { frame }) => assert_eq!(frame.spectrum.len(), 1024),
//!     other => panic!("unexpected response: {:?}", other),
//! }
//! # Ok::<(), spectra_dsp::AnalysisError>(())
//! ```

pub mod message;

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub use message::{Request, Response};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::progress::{AnalysisContext, CancellationToken, Progress};

fn missing(field: &str) -> AnalysisError {
    AnalysisError::InvalidInput(format!("Missing required field: {}", field))
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Request handler holding the configuration between requests
///
/// Overrides sent with an analysis request are merged into the current
/// configuration and persist for later requests until overridden again.
#[derive(Debug, Clone, Default)]
pub struct WorkerState {
    config: AnalysisConfig,
}

impl WorkerState {
    /// Handler starting from `config`
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Handle one request
    ///
    /// Progress responses are passed to `emit` while the request runs; the
    /// final response is returned.
    pub fn handle(
        &mut self,
        request: Request,
        cancel: &CancellationToken,
        emit: &mut dyn FnMut(Response),
    ) -> Response {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(request, cancel, emit)));

        match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                log::warn!("Request failed: {}", e);
                Response::Error {
                    message: e.to_string(),
                }
            }
            Err(payload) => {
                let message = panic_message(payload);
                log::error!("Analysis panicked: {}", message);
                Response::Error {
                    message: format!("Processing error: {}", message),
                }
            }
        }
    }

    fn dispatch(
        &mut self,
        request: Request,
        cancel: &CancellationToken,
        emit: &mut dyn FnMut(Response),
    ) -> Result<Response, AnalysisError> {
        match request {
            Request::Analyze {
                samples,
                sample_rate,
                config,
                progress_id,
            } => {
                let samples = samples.ok_or_else(|| missing("samples"))?;
                let sample_rate = sample_rate.ok_or_else(|| missing("sampleRate"))?;

                if let Some(overrides) = config {
                    let merged = self.config.merged(&overrides);
                    merged.validate()?;
                    self.config = merged;
                }

                let config = self.config.clone();
                let result = with_context(progress_id, cancel, emit, |ctx| {
                    crate::analyze_audio(&samples, sample_rate, &config, ctx)
                })?;

                Ok(Response::AnalysisComplete {
                    result: Box::new(result),
                })
            }

            Request::ProcessRealtime { samples } => {
                let samples = samples.ok_or_else(|| missing("samples"))?;
                let frame = crate::process_frame(&samples, &self.config)?;
                Ok(Response::RealtimeFrame { frame })
            }

            Request::ExtractFeatures {
                samples,
                sample_rate,
                progress_id,
            } => {
                let samples = samples.ok_or_else(|| missing("samples"))?;
                let sample_rate = sample_rate.ok_or_else(|| missing("sampleRate"))?;

                let config = self.config.clone();
                let features = with_context(progress_id, cancel, emit, |ctx| {
                    crate::extract_features(&samples, sample_rate, &config, ctx)
                })?;

                Ok(Response::FeaturesExtracted { features })
            }
        }
    }
}

/// Run `f` with a context that forwards progress under `progress_id`
fn with_context<T>(
    progress_id: Option<String>,
    cancel: &CancellationToken,
    emit: &mut dyn FnMut(Response),
    f: impl FnOnce(&mut AnalysisContext<'_>) -> Result<T, AnalysisError>,
) -> Result<T, AnalysisError> {
    match progress_id {
        Some(id) => {
            let mut sink = |p: Progress| {
                emit(Response::Progress {
                    id: id.clone(),
                    percent: p.percent,
                    message: p.message,
                })
            };
            let mut ctx = AnalysisContext::with_progress(&mut sink).cancellable(cancel);
            f(&mut ctx)
        }
        None => {
            let mut ctx = AnalysisContext::default().cancellable(cancel);
            f(&mut ctx)
        }
    }
}

/// Analysis worker running on its own thread
///
/// Requests are processed in order. Each queued request carries the
/// cancellation token current at the time it was sent; [`Worker::cancel`]
/// trips that token and installs a fresh one, so it stops the running request
/// and every request queued before the call. Dropping the worker closes its
/// request channel and waits for the thread to finish the request in flight.
pub struct Worker {
    requests: Option<Sender<(Request, CancellationToken)>>,
    responses: Receiver<Response>,
    cancel: Mutex<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn a worker with the default configuration
    pub fn spawn() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Spawn a worker starting from `config`
    pub fn with_config(config: AnalysisConfig) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<(Request, CancellationToken)>();
        let (response_tx, response_rx) = mpsc::channel::<Response>();

        let handle = thread::spawn(move || {
            let mut state = WorkerState::new(config);
            for (request, token) in request_rx {
                let progress_tx = response_tx.clone();
                let mut emit = |r: Response| {
                    let _ = progress_tx.send(r);
                };
                let response = state.handle(request, &token, &mut emit);
                if response_tx.send(response).is_err() {
                    log::debug!("Response receiver dropped, stopping worker");
                    break;
                }
            }
        });

        Self {
            requests: Some(request_tx),
            responses: response_rx,
            cancel: Mutex::new(CancellationToken::new()),
            handle: Some(handle),
        }
    }

    fn current_token(&self) -> MutexGuard<'_, CancellationToken> {
        self.cancel.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a request
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::ProcessingError` if the worker thread has stopped
    pub fn send(&self, request: Request) -> Result<(), AnalysisError> {
        let token = self.current_token().clone();
        self.requests
            .as_ref()
            .ok_or_else(|| AnalysisError::ProcessingError("Worker is shut down".to_string()))?
            .send((request, token))
            .map_err(|_| AnalysisError::ProcessingError("Worker thread has stopped".to_string()))
    }

    /// Block until the next response; `None` once the worker has stopped
    pub fn recv(&self) -> Option<Response> {
        self.responses.recv().ok()
    }

    /// Wait up to `timeout` for the next response
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Response> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Receive responses until the final one of the current request
    ///
    /// Returns the progress updates seen on the way and the final response.
    pub fn recv_final(&self) -> Option<(Vec<Response>, Response)> {
        let mut progress = Vec::new();
        while let Some(response) = self.recv() {
            if response.is_final() {
                return Some((progress, response));
            }
            progress.push(response);
        }
        None
    }

    /// Cancel the running request and every request queued so far
    ///
    /// Requests sent after this call run normally.
    pub fn cancel(&self) {
        let mut token = self.current_token();
        token.cancel();
        *token = CancellationToken::new();
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
