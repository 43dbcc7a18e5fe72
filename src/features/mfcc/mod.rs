//! Mel-frequency cepstral coefficients
//!
//! Per frame: 26-filter mel bank followed by a 13-point cosine transform
//! `c_j = Σ_k m_k · cos(π·j·(k + 0.5) / 26)`. The filter outputs are used
//! linearly (no log compression).

pub mod mel;

use std::f32::consts::PI;

use mel::{MelFilterBank, NUM_MEL_FILTERS};

use crate::spectrum::FrequencyData;

/// Coefficients kept per frame
pub const NUM_MFCC: usize = 13;

/// Type-II cosine sum of `filtered`, keeping the first `num_coeffs` terms
pub fn cosine_transform(filtered: &[f32], num_coeffs: usize) -> Vec<f32> {
    let n = filtered.len() as f32;
    (0..num_coeffs)
        .map(|j| {
            filtered
                .iter()
                .enumerate()
                .map(|(k, &m)| m * (PI * j as f32 * (k as f32 + 0.5) / n).cos())
                .sum()
        })
        .collect()
}

/// Compute a 13-coefficient vector for every frame
///
/// # Example
///
/// ```
/// use spectra_dsp::features::mfcc::{compute_mfcc, NUM_MFCC};
/// use spectra_dsp::spectrum::FrequencyData;
///
/// let data = FrequencyData {
///     frequencies: vec![vec![1.0; 1024]; 3],
///     time_stamps: vec![0.0, 0.01, 0.02],
///     sample_rate: 44100,
///     fft_size: 2048,
/// };
/// let mfcc = compute_mfcc(&data);
/// assert_eq!(mfcc.len(), 3);
/// assert!(mfcc.iter().all(|c| c.len() == NUM_MFCC));
/// ```
pub fn compute_mfcc(data: &FrequencyData) -> Vec<Vec<f32>> {
    let bank = MelFilterBank::new(NUM_MEL_FILTERS, data.bin_count(), data.sample_rate);
    log::debug!(
        "MFCC: {} frames, {} filters, {} coefficients",
        data.len(),
        bank.len(),
        NUM_MFCC
    );

    data.frequencies
        .iter()
        .map(|spectrum| {
            let filtered = bank.apply(spectrum);
            if filtered.is_empty() {
                return vec![0.0; NUM_MFCC];
            }
            cosine_transform(&filtered, NUM_MFCC)
        })
        .collect()
}
