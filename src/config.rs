//! Configuration parameters for feature extraction
//!
//! [`AnalysisConfig`] is an immutable value handed to every analysis call.
//! Callers that only want to change a few fields describe them with
//! [`ConfigOverrides`] and build a new config with [`AnalysisConfig::merged`].

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::preprocessing::window::WindowFunction;
use crate::spectrum::TransformKind;

/// Analysis configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // STFT parameters
    /// Transform size in samples, must be a power of two (default: 2048)
    pub fft_size: usize,

    /// Taper applied to each frame before the transform (default: Hann)
    pub window: WindowFunction,

    /// Offset between consecutive frames (default: 512, must be <= `fft_size`)
    pub hop_size: usize,

    /// Transform backend (default: Fast)
    /// `Direct` evaluates the DFT sum explicitly and is only useful as a reference
    pub transform: TransformKind,

    // Spectral features
    /// Energy fraction used by the rolloff calculator (default: 0.85)
    pub rolloff_threshold: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            window: WindowFunction::Hann,
            hop_size: 512,
            transform: TransformKind::Fast,
            rolloff_threshold: 0.85,
        }
    }
}

/// Partial configuration supplied by a caller
///
/// Every `Some` field replaces the corresponding field of the base config;
/// `None` fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverrides {
    /// Transform size override
    pub fft_size: Option<usize>,
    /// Window function override
    pub window_function: Option<WindowFunction>,
    /// Hop size override
    pub hop_size: Option<usize>,
    /// Transform backend override
    pub transform: Option<TransformKind>,
    /// Rolloff threshold override
    pub rolloff_threshold: Option<f32>,
}

impl AnalysisConfig {
    /// Shallow-merge `overrides` on top of `self`, returning a new config
    ///
    /// The result is not validated; call [`validate`](Self::validate) before use.
    pub fn merged(&self, overrides: &ConfigOverrides) -> Self {
        Self {
            fft_size: overrides.fft_size.unwrap_or(self.fft_size),
            window: overrides.window_function.unwrap_or(self.window),
            hop_size: overrides.hop_size.unwrap_or(self.hop_size),
            transform: overrides.transform.unwrap_or(self.transform),
            rolloff_threshold: overrides.rolloff_threshold.unwrap_or(self.rolloff_threshold),
        }
    }

    /// Check that the parameters describe a usable analysis
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if:
    /// - `fft_size` is not a power of two or smaller than 2
    /// - `hop_size` is 0 or larger than `fft_size`
    /// - `rolloff_threshold` is outside `(0.0, 1.0]`
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.fft_size < 2 || !self.fft_size.is_power_of_two() {
            return Err(AnalysisError::InvalidConfig(format!(
                "FFT size must be a power of two >= 2, got {}",
                self.fft_size
            )));
        }

        if self.hop_size == 0 {
            return Err(AnalysisError::InvalidConfig(
                "Hop size must be > 0".to_string(),
            ));
        }

        if self.hop_size > self.fft_size {
            return Err(AnalysisError::InvalidConfig(format!(
                "Hop size ({}) must not exceed FFT size ({})",
                self.hop_size, self.fft_size
            )));
        }

        if !(self.rolloff_threshold > 0.0 && self.rolloff_threshold <= 1.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "Rolloff threshold must be in (0.0, 1.0], got {}",
                self.rolloff_threshold
            )));
        }

        Ok(())
    }
}
