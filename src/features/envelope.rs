//! Amplitude envelope extraction
//!
//! Splits the signal into non-overlapping 10 ms windows (the remainder is
//! dropped) and records the peak absolute sample of each window. Overall RMS is
//! `sqrt(sum of squares over all windows / len(signal))`: the denominator is
//! the full signal length, not the windowed sample count.

use serde::{Deserialize, Serialize};

/// Envelope window duration in seconds
pub const ENVELOPE_WINDOW_SECONDS: f32 = 0.01;

/// Per-window peak envelope of a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmplitudeData {
    /// Peak absolute sample per window
    pub envelope: Vec<f32>,
    /// Window start times in seconds
    pub time_stamps: Vec<f32>,
    /// Largest absolute sample over all windows
    pub peak: f32,
    /// Root-mean-square level
    pub rms: f32,
}

impl AmplitudeData {
    /// Envelope with no windows
    pub fn empty() -> Self {
        Self {
            envelope: Vec::new(),
            time_stamps: Vec::new(),
            peak: 0.0,
            rms: 0.0,
        }
    }
}

/// Window length in samples for `sample_rate`
pub fn envelope_window_size(sample_rate: u32) -> usize {
    (sample_rate as f32 * ENVELOPE_WINDOW_SECONDS) as usize
}

/// Extract the amplitude envelope of `samples`
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// `AmplitudeData`; empty when the signal is shorter than one window
///
/// # Example
///
/// ```
/// use spectra_dsp::features::envelope::extract_amplitude;
///
/// let samples = vec![0.5f32; 4410];
/// let amp = extract_amplitude(&samples, 44100);
/// assert_eq!(amp.envelope.len(), 10);
/// assert!((amp.rms - 0.5).abs() < 1e-6);
/// ```
pub fn extract_amplitude(samples: &[f32], sample_rate: u32) -> AmplitudeData {
    let window_size = envelope_window_size(sample_rate);

    if window_size == 0 || samples.len() < window_size {
        log::debug!(
            "Signal ({} samples) shorter than envelope window ({}), empty envelope",
            samples.len(),
            window_size
        );
        return AmplitudeData::empty();
    }

    let num_windows = samples.len() / window_size;
    let mut envelope = Vec::with_capacity(num_windows);
    let mut time_stamps = Vec::with_capacity(num_windows);
    let mut peak = 0.0f32;
    let mut sum_sq = 0.0f64;

    for (i, window) in samples.chunks_exact(window_size).enumerate() {
        let mut window_peak = 0.0f32;
        for &x in window {
            window_peak = window_peak.max(x.abs());
            sum_sq += (x as f64) * (x as f64);
        }
        peak = peak.max(window_peak);
        envelope.push(window_peak);
        time_stamps.push((i * window_size) as f32 / sample_rate as f32);
    }

    let rms = (sum_sq / samples.len() as f64).sqrt() as f32;

    log::debug!(
        "Amplitude envelope: {} windows of {} samples, peak={:.4}, rms={:.4}",
        envelope.len(),
        window_size,
        peak,
        rms
    );

    AmplitudeData {
        envelope,
        time_stamps,
        peak,
        rms,
    }
}
