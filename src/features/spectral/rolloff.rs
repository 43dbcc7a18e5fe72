//! Spectral rolloff
//!
//! Frequency below which a given fraction (default 85%) of a frame's
//! squared-magnitude energy lies. The DC bin is excluded from both the total
//! and the running sum. Frames with no energy yield 0.

use crate::spectrum::FrequencyData;

/// Default energy fraction
pub const DEFAULT_ROLLOFF_THRESHOLD: f32 = 0.85;

/// Rolloff of one spectrum in Hz
///
/// Returns the frequency of the smallest bin `j >= 1` whose cumulative energy
/// reaches `threshold * total`.
pub fn frame_rolloff(spectrum: &[f32], bin_hz: f32, threshold: f32) -> f32 {
    let total: f32 = spectrum.iter().skip(1).map(|&m| m * m).sum();
    if total <= 0.0 {
        return 0.0;
    }

    let target = threshold * total;
    let mut cumulative = 0.0f32;
    for (j, &mag) in spectrum.iter().enumerate().skip(1) {
        cumulative += mag * mag;
        if cumulative >= target {
            return j as f32 * bin_hz;
        }
    }

    // Rounding can leave the running sum a hair below the target
    (spectrum.len() - 1) as f32 * bin_hz
}

/// Spectral rolloff (Hz) of every frame at `threshold`
pub fn spectral_rolloff(data: &FrequencyData, threshold: f32) -> Vec<f32> {
    let bin_hz = data.bin_resolution();
    data.frequencies
        .iter()
        .map(|spectrum| frame_rolloff(spectrum, bin_hz, threshold))
        .collect()
}
