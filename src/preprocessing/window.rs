//! Window functions applied to frames before the spectral transform
//!
//! Supported tapers, for a frame of length `N` and sample index `i`:
//! - Rectangular: `w(i) = 1`
//! - Hann: `w(i) = 0.5 * (1 - cos(2πi / (N-1)))`
//! - Hamming: `w(i) = 0.54 - 0.46 * cos(2πi / (N-1))`
//! - Blackman: `w(i) = 0.42 - 0.5 * cos(2πi / (N-1)) + 0.08 * cos(4πi / (N-1))`
//!
//! A single-sample frame has no `N-1` denominator; every window returns a
//! weight of 1.0 in that case.
//!
//! # Example
//!
//! ```
//! use spectra_dsp::preprocessing::window::{apply_window, WindowFunction};
//!
//! let frame = vec![1.0f32; 8];
//! let windowed = apply_window(&frame, WindowFunction::Hann);
//! assert_eq!(windowed.len(), 8);
//! assert!(windowed[0].abs() < 1e-6);
//! ```

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Taper selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowFunction {
    /// No taper (weight 1 everywhere)
    Rectangular,
    /// Hann (raised cosine), the default
    #[default]
    Hann,
    /// Hamming
    Hamming,
    /// Blackman
    Blackman,
}

impl WindowFunction {
    /// Weight for sample `index` of a frame of length `len`
    pub fn weight(self, index: usize, len: usize) -> f32 {
        if len <= 1 {
            return 1.0;
        }

        let phase = 2.0 * PI * index as f32 / (len - 1) as f32;
        match self {
            WindowFunction::Rectangular => 1.0,
            WindowFunction::Hann => 0.5 * (1.0 - phase.cos()),
            WindowFunction::Hamming => 0.54 - 0.46 * phase.cos(),
            WindowFunction::Blackman => 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos(),
        }
    }

    /// Precompute the full weight table for frames of length `len`
    pub fn coefficients(self, len: usize) -> Vec<f32> {
        (0..len).map(|i| self.weight(i, len)).collect()
    }
}

/// Apply a window to a frame, returning a new frame of the same length
///
/// # Arguments
///
/// * `frame` - Input samples
/// * `window` - Taper to apply
///
/// # Returns
///
/// Windowed copy of `frame`
pub fn apply_window(frame: &[f32], window: WindowFunction) -> Vec<f32> {
    let len = frame.len();
    frame
        .iter()
        .enumerate()
        .map(|(i, &x)| x * window.weight(i, len))
        .collect()
}

/// Apply precomputed window coefficients into `out`
///
/// Used by the frame segmenter to avoid recomputing cosines per frame.
/// `coefficients`, `frame` and `out` must have the same length.
pub(crate) fn apply_coefficients(frame: &[f32], coefficients: &[f32], out: &mut [f32]) {
    for ((o, &x), &w) in out.iter_mut().zip(frame).zip(coefficients) {
        *o = x * w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangular_is_identity() {
        let frame: Vec<f32> = (0..16).map(|i| i as f32 * 0.1 - 0.8).collect();
        let windowed = apply_window(&frame, WindowFunction::Rectangular);
        assert_eq!(windowed, frame);
    }

    #[test]
    fn test_hann_endpoints_and_center() {
        let n = 9;
        let coeffs = WindowFunction::Hann.coefficients(n);
        assert!(coeffs[0].abs() < 1e-6);
        assert!(coeffs[n - 1].abs() < 1e-6);
        assert!((coeffs[n / 2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hamming_endpoints() {
        let coeffs = WindowFunction::Hamming.coefficients(32);
        assert!((coeffs[0] - 0.08).abs() < 1e-5);
        assert!((coeffs[31] - 0.08).abs() < 1e-5);
    }

    #[test]
    fn test_blackman_is_symmetric() {
        let coeffs = WindowFunction::Blackman.coefficients(64);
        for i in 0..32 {
            assert!((coeffs[i] - coeffs[63 - i]).abs() < 1e-5);
        }
        assert!(coeffs[0].abs() < 1e-5);
    }

    #[test]
    fn test_single_sample_frame() {
        for window in [
            WindowFunction::Rectangular,
            WindowFunction::Hann,
            WindowFunction::Hamming,
            WindowFunction::Blackman,
        ] {
            assert_eq!(apply_window(&[0.7], window), vec![0.7]);
        }
    }

    #[test]
    fn test_empty_frame() {
        assert!(apply_window(&[], WindowFunction::Hann).is_empty());
    }
}
