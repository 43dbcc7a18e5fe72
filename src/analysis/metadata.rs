//! Analysis metadata structures

use serde::{Deserialize, Serialize};

use crate::features::period::TempoMethod;

/// Analysis metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// Signal duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Spectral frames analysed
    pub frame_count: usize,

    /// Onsets used by the tempo estimator
    pub onset_count: usize,

    /// Tempo estimator that produced the result
    pub tempo_method: TempoMethod,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            duration_seconds: 0.0,
            sample_rate: 0,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            frame_count: 0,
            onset_count: 0,
            tempo_method: TempoMethod::None,
        }
    }
}
