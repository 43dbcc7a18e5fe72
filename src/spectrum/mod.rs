//! Spectral analysis modules
//!
//! Converts a mono signal into a time series of magnitude spectra:
//! - Single-frame transform (direct DFT or FFT)
//! - Frame segmentation with windowing, progress and cancellation

pub mod dft;
pub mod segmenter;

use serde::{Deserialize, Serialize};

/// Transform backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// FFT (`rustfft`)
    #[default]
    Fast,
    /// Explicit O(N²) DFT summation
    Direct,
}

/// Time series of magnitude spectra
///
/// `frequencies[i]` is the spectrum of the frame starting at `time_stamps[i]`
/// seconds. Every spectrum has `fft_size / 2` bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyData {
    /// One magnitude spectrum per frame
    pub frequencies: Vec<Vec<f32>>,
    /// Frame start times in seconds
    pub time_stamps: Vec<f32>,
    /// Sample rate of the analysed signal (Hz)
    pub sample_rate: u32,
    /// Transform size used for every frame
    pub fft_size: usize,
}

impl FrequencyData {
    /// Empty time series for the given parameters
    pub fn empty(sample_rate: u32, fft_size: usize) -> Self {
        Self {
            frequencies: Vec::new(),
            time_stamps: Vec::new(),
            sample_rate,
            fft_size,
        }
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether no frame was produced
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Bins per spectrum
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Width of one bin in Hz
    pub fn bin_resolution(&self) -> f32 {
        if self.fft_size == 0 {
            return 0.0;
        }
        self.sample_rate as f32 / self.fft_size as f32
    }

    /// Centre frequency of bin `k` in Hz
    pub fn bin_frequency(&self, k: usize) -> f32 {
        k as f32 * self.bin_resolution()
    }
}
