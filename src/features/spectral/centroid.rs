//! Spectral centroid
//!
//! Magnitude-weighted mean frequency of each frame, with the DC bin excluded:
//! `Σ_{j≥1} f_j·|X_j| / Σ_{j≥1} |X_j|`. Frames with no energy yield 0.

use crate::spectrum::FrequencyData;

/// Centroid of one spectrum in Hz
///
/// `bin_hz` is the width of one bin (`sample_rate / fft_size`).
pub fn frame_centroid(spectrum: &[f32], bin_hz: f32) -> f32 {
    let mut weighted = 0.0f32;
    let mut total = 0.0f32;

    for (j, &mag) in spectrum.iter().enumerate().skip(1) {
        weighted += j as f32 * bin_hz * mag;
        total += mag;
    }

    if total > 0.0 {
        weighted / total
    } else {
        0.0
    }
}

/// Spectral centroid (Hz) of every frame
///
/// # Example
///
/// ```
/// use spectra_dsp::features::spectral::spectral_centroid;
/// use spectra_dsp::spectrum::FrequencyData;
///
/// let data = FrequencyData {
///     frequencies: vec![vec![0.0, 0.0, 1.0, 0.0]],
///     time_stamps: vec![0.0],
///     sample_rate: 8000,
///     fft_size: 8,
/// };
/// assert_eq!(spectral_centroid(&data), vec![2000.0]);
/// ```
pub fn spectral_centroid(data: &FrequencyData) -> Vec<f32> {
    let bin_hz = data.bin_resolution();
    data.frequencies
        .iter()
        .map(|spectrum| frame_centroid(spectrum, bin_hz))
        .collect()
}
