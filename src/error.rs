//! Error types for the feature extraction engine

use std::fmt;

/// Errors that can occur during audio analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid or missing input (empty request fields, zero sample rate, ...)
    InvalidInput(String),

    /// Configuration rejected by [`AnalysisConfig::validate`](crate::AnalysisConfig::validate)
    InvalidConfig(String),

    /// Processing error during analysis
    ProcessingError(String),

    /// Numerical error (non-finite samples, overflow, etc.)
    NumericalError(String),

    /// Analysis was stopped through a [`CancellationToken`](crate::CancellationToken)
    Cancelled,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            AnalysisError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            AnalysisError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            AnalysisError::Cancelled => write!(f, "Analysis cancelled"),
        }
    }
}

impl std::error::Error for AnalysisError {}
