//! Progress reporting and cooperative cancellation
//!
//! Long analyses report progress through a [`ProgressSink`] and poll a
//! [`CancellationToken`] at fixed frame intervals. Both are optional; an
//! [`AnalysisContext::default()`] runs silently to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Progress update emitted while segmenting a long signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Completion percentage (0.0-100.0)
    pub percent: f32,
    /// Human-readable description of the current stage
    pub message: String,
}

/// Receiver of progress updates
pub trait ProgressSink {
    /// Called with each progress update
    fn report(&mut self, progress: Progress);
}

impl<F> ProgressSink for F
where
    F: FnMut(Progress),
{
    fn report(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Shared flag used to stop an in-flight analysis
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token in the non-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every clone observes it
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clear a previous cancellation so the token can be reused
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Optional progress sink and cancellation token for one analysis call
#[derive(Default)]
pub struct AnalysisContext<'a> {
    /// Progress receiver; no progress is reported when `None`
    pub progress: Option<&'a mut dyn ProgressSink>,
    /// Cancellation token polled at checkpoint intervals
    pub cancel: Option<&'a CancellationToken>,
}

impl<'a> AnalysisContext<'a> {
    /// Context that reports progress to `sink`
    pub fn with_progress(sink: &'a mut dyn ProgressSink) -> Self {
        Self {
            progress: Some(sink),
            cancel: None,
        }
    }

    /// Attach a cancellation token
    pub fn cancellable(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn report(&mut self, percent: f32, message: impl Into<String>) {
        if let Some(sink) = self.progress.as_mut() {
            sink.report(Progress {
                percent: percent.clamp(0.0, 100.0),
                message: message.into(),
            });
        }
    }

    pub(crate) fn checkpoint(&self) -> Result<(), AnalysisError> {
        match self.cancel {
            Some(token) if token.is_cancelled() => Err(AnalysisError::Cancelled),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
        clone.reset();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_context_without_sink_is_silent() {
        let mut ctx = AnalysisContext::default();
        ctx.report(50.0, "ignored");
        assert!(ctx.checkpoint().is_ok());
    }

    #[test]
    fn test_closure_sink_receives_clamped_percent() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: Progress| seen.push(p);
            let mut ctx = AnalysisContext::with_progress(&mut sink);
            ctx.report(150.0, "done");
        }
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].percent, 100.0);
        assert_eq!(seen[0].message, "done");
    }

    #[test]
    fn test_checkpoint_observes_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = AnalysisContext::default().cancellable(&token);
        assert_eq!(ctx.checkpoint(), Err(AnalysisError::Cancelled));
    }
}
