//! Magnitude spectrum of a single frame
//!
//! Two interchangeable backends produce the same `N/2` magnitudes:
//! - [`DirectDft`]: explicit O(N²) summation against a precomputed
//!   cosine/sine table of length `N`, kept as the numerical reference
//! - [`FastDft`]: `rustfft` forward transform, used by default
//!
//! Bin `k` of the output represents frequency `k * sample_rate / N`.
//! Phase is discarded.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use super::TransformKind;

/// Direct DFT with precomputed trigonometric tables
#[derive(Debug, Clone)]
pub struct DirectDft {
    size: usize,
    cos_table: Vec<f32>,
    sin_table: Vec<f32>,
}

impl DirectDft {
    /// Build tables for frames of length `size`
    pub fn new(size: usize) -> Self {
        let (cos_table, sin_table) = (0..size)
            .map(|m| {
                let angle = 2.0 * PI * m as f32 / size as f32;
                (angle.cos(), angle.sin())
            })
            .unzip();

        Self {
            size,
            cos_table,
            sin_table,
        }
    }

    /// Frame length this transform was built for
    pub fn size(&self) -> usize {
        self.size
    }

    /// Compute `size / 2` magnitudes into `out`
    ///
    /// `frame` must have length `size`; `out` must have length `size / 2`.
    pub fn magnitudes_into(&self, frame: &[f32], out: &mut [f32]) {
        let n = self.size;
        for (k, mag) in out.iter_mut().enumerate() {
            let mut real = 0.0f32;
            let mut imag = 0.0f32;
            for (i, &x) in frame.iter().enumerate() {
                // (k * i) mod n indexes the table without recomputing the angle
                let idx = (k * i) % n;
                real += x * self.cos_table[idx];
                imag += x * self.sin_table[idx];
            }
            *mag = (real * real + imag * imag).sqrt();
        }
    }
}

/// `rustfft`-backed transform producing the same magnitudes as [`DirectDft`]
pub struct FastDft {
    size: usize,
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl FastDft {
    /// Plan a forward transform for frames of length `size`
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Self {
            size,
            fft,
            buffer: vec![Complex::new(0.0, 0.0); size],
            scratch,
        }
    }

    /// Compute `size / 2` magnitudes into `out`
    pub fn magnitudes_into(&mut self, frame: &[f32], out: &mut [f32]) {
        for (c, &x) in self.buffer.iter_mut().zip(frame) {
            *c = Complex::new(x, 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        for (mag, c) in out.iter_mut().zip(&self.buffer) {
            *mag = c.norm();
        }
    }
}

impl std::fmt::Debug for FastDft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastDft").field("size", &self.size).finish()
    }
}

/// Frame transform dispatching to the configured backend
#[derive(Debug)]
pub enum SpectrumTransform {
    /// Explicit summation
    Direct(DirectDft),
    /// FFT
    Fast(FastDft),
}

impl SpectrumTransform {
    /// Prepare a transform of length `size` using `kind`
    pub fn new(kind: TransformKind, size: usize) -> Self {
        match kind {
            TransformKind::Direct => SpectrumTransform::Direct(DirectDft::new(size)),
            TransformKind::Fast => SpectrumTransform::Fast(FastDft::new(size)),
        }
    }

    /// Frame length
    pub fn size(&self) -> usize {
        match self {
            SpectrumTransform::Direct(t) => t.size,
            SpectrumTransform::Fast(t) => t.size,
        }
    }

    /// Compute the magnitude spectrum of `frame` into `out`
    ///
    /// Frames shorter than the transform size are zero-padded, longer ones
    /// truncated. `out` receives `size / 2` values.
    pub fn magnitudes_into(&mut self, frame: &[f32], out: &mut [f32]) {
        let size = self.size();
        let padded;
        let frame = if frame.len() == size {
            frame
        } else {
            let mut buf = vec![0.0f32; size];
            let n = frame.len().min(size);
            buf[..n].copy_from_slice(&frame[..n]);
            padded = buf;
            &padded[..]
        };

        match self {
            SpectrumTransform::Direct(t) => t.magnitudes_into(frame, out),
            SpectrumTransform::Fast(t) => t.magnitudes_into(frame, out),
        }
    }

    /// Compute and return the magnitude spectrum of `frame`
    pub fn magnitudes(&mut self, frame: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0f32; self.size() / 2];
        self.magnitudes_into(frame, &mut out);
        out
    }
}

/// One-shot magnitude spectrum of `frame` (length `frame.len() / 2`)
///
/// Convenience wrapper for callers that transform a single frame; the
/// segmenter reuses a [`SpectrumTransform`] instead.
///
/// # Example
///
/// ```
/// use spectra_dsp::spectrum::{dft::magnitude_spectrum, TransformKind};
///
/// let frame: Vec<f32> = (0..64)
///     .map(|i| (2.0 * std::f32::consts::PI * 4.0 * i as f32 / 64.0).sin())
///     .collect();
/// let spectrum = magnitude_spectrum(&frame, TransformKind::Direct);
/// let peak = spectrum
///     .iter()
///     .enumerate()
///     .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
///     .map(|(i, _)| i);
/// assert_eq!(peak, Some(4));
/// ```
pub fn magnitude_spectrum(frame: &[f32], kind: TransformKind) -> Vec<f32> {
    if frame.len() < 2 {
        return Vec::new();
    }
    SpectrumTransform::new(kind, frame.len()).magnitudes(frame)
}
