//! Spectral flux onset detection
//!
//! Novelty is the half-wave rectified frame-to-frame magnitude increase,
//! summed over all bins:
//!
//! `flux[i] = Σ_j max(0, |X_j(i+1)| - |X_j(i)|)`
//!
//! Peaks are picked against an adaptive threshold `mean(flux) + 2·σ(flux)`.
//! A peak at `flux[i]` marks an onset at the start of frame `i + 1`.
//!
//! # Reference
//!
//! Bello, J. P., Daudet, L., Abdallah, S., Duxbury, C., Davies, M., & Sandler, M. B. (2005).
//! A Tutorial on Onset Detection in Music Signals.
//! *IEEE Transactions on Speech and Audio Processing*, 13(5), 1035-1047.

use super::threshold::{adaptive_threshold_mean_std, strict_local_maxima};
use crate::spectrum::FrequencyData;

/// Standard deviations above the mean required for a flux peak
pub const FLUX_THRESHOLD_STD: f32 = 2.0;

/// Spectral flux between consecutive frames
///
/// # Returns
///
/// Novelty curve with `n_frames - 1` values; empty for fewer than 2 frames
pub fn spectral_flux(frames: &[Vec<f32>]) -> Vec<f32> {
    frames
        .windows(2)
        .map(|pair| {
            pair[1]
                .iter()
                .zip(&pair[0])
                .map(|(&cur, &prev)| (cur - prev).max(0.0))
                .sum()
        })
        .collect()
}

/// Detect onsets using the spectral flux method
///
/// # Arguments
///
/// * `data` - Magnitude spectrogram with frame timestamps
///
/// # Returns
///
/// Onset times in seconds, ascending
///
/// # Example
///
/// ```
/// use spectra_dsp::features::onset::spectral_flux::detect_spectral_flux_onsets;
/// use spectra_dsp::spectrum::FrequencyData;
///
/// let mut frequencies = vec![vec![0.0f32; 8]; 20];
/// frequencies[10] = vec![1.0; 8];
/// let data = FrequencyData {
///     time_stamps: (0..20).map(|i| i as f32 * 0.5).collect(),
///     frequencies,
///     sample_rate: 16,
///     fft_size: 16,
/// };
/// let onsets = detect_spectral_flux_onsets(&data);
/// assert_eq!(onsets, vec![5.0]);
/// ```
pub fn detect_spectral_flux_onsets(data: &FrequencyData) -> Vec<f32> {
    let flux = spectral_flux(&data.frequencies);
    let threshold = adaptive_threshold_mean_std(&flux, FLUX_THRESHOLD_STD);

    let onsets: Vec<f32> = strict_local_maxima(&flux, threshold)
        .into_iter()
        .filter_map(|i| data.time_stamps.get(i + 1).copied())
        .collect();

    log::debug!(
        "Spectral flux: {} values, threshold={:.6}, {} onsets",
        flux.len(),
        threshold,
        onsets.len()
    );

    onsets
}
