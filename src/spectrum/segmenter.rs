//! Frame segmentation (short-time spectral analysis)
//!
//! Slices the signal into overlapping frames, windows and transforms each one
//! and assembles the resulting [`FrequencyData`].
//!
//! Frame `i` starts at sample `i * hop_size`. The number of frames is
//! `(len - fft_size) / hop_size` (integer division); the trailing partial
//! frame is dropped, and a signal no longer than one frame produces no frames.
//!
//! # Example
//!
//! ```
//! use spectra_dsp::spectrum::segmenter::compute_frequency_data;
//! use spectra_dsp::{AnalysisConfig, AnalysisContext};
//!
//! let samples = vec![0.0f32; 44100];
//! let data = compute_frequency_data(
//!     &samples,
//!     44100,
//!     &AnalysisConfig::default(),
//!     &mut AnalysisContext::default(),
//! )?;
//! assert_eq!(data.frequencies.len(), data.time_stamps.len());
//! # Ok::<(), spectra_dsp::AnalysisError>(())
//! ```

use super::dft::SpectrumTransform;
use super::FrequencyData;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::preprocessing::window::apply_coefficients;
use crate::progress::AnalysisContext;

/// Frames between progress reports
pub const PROGRESS_INTERVAL: usize = 50;

/// Frames between cancellation checks
pub const CHECKPOINT_INTERVAL: usize = 100;

/// Number of frames produced for a signal of `len` samples
pub fn frame_count(len: usize, fft_size: usize, hop_size: usize) -> usize {
    if hop_size == 0 || len < fft_size {
        return 0;
    }
    (len - fft_size) / hop_size
}

/// Compute the magnitude spectrogram of `samples`
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Frame size, hop size, window and transform backend
/// * `ctx` - Optional progress sink and cancellation token
///
/// # Returns
///
/// `FrequencyData` with one `fft_size / 2` spectrum per frame
///
/// # Errors
///
/// Returns `AnalysisError::InvalidConfig` if `config` does not validate and
/// `AnalysisError::Cancelled` if the token is tripped mid-analysis.
pub fn compute_frequency_data(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
    ctx: &mut AnalysisContext<'_>,
) -> Result<FrequencyData, AnalysisError> {
    config.validate()?;

    let fft_size = config.fft_size;
    let hop_size = config.hop_size;
    let total = frame_count(samples.len(), fft_size, hop_size);

    log::debug!(
        "Segmenting {} samples: fft={}, hop={}, window={:?}, {} frames",
        samples.len(),
        fft_size,
        hop_size,
        config.window,
        total
    );

    if total == 0 {
        if !samples.is_empty() {
            log::warn!(
                "Signal ({} samples) too short for a {}-sample frame, no spectra produced",
                samples.len(),
                fft_size
            );
        }
        return Ok(FrequencyData::empty(sample_rate, fft_size));
    }

    ctx.checkpoint()?;

    let coefficients = config.window.coefficients(fft_size);
    let mut transform = SpectrumTransform::new(config.transform, fft_size);
    let mut windowed = vec![0.0f32; fft_size];

    let mut frequencies = Vec::with_capacity(total);
    let mut time_stamps = Vec::with_capacity(total);

    for i in 0..total {
        let start = i * hop_size;
        let frame = &samples[start..start + fft_size];

        apply_coefficients(frame, &coefficients, &mut windowed);
        let mut spectrum = vec![0.0f32; fft_size / 2];
        transform.magnitudes_into(&windowed, &mut spectrum);

        frequencies.push(spectrum);
        time_stamps.push(start as f32 / sample_rate as f32);

        let processed = i + 1;
        if processed % PROGRESS_INTERVAL == 0 {
            ctx.report(
                processed as f32 / total as f32 * 100.0,
                format!("Processing frame {}/{}", processed, total),
            );
        }
        if processed % CHECKPOINT_INTERVAL == 0 {
            ctx.checkpoint()?;
        }
    }

    Ok(FrequencyData {
        frequencies,
        time_stamps,
        sample_rate,
        fft_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::window::WindowFunction;
    use crate::progress::{CancellationToken, Progress};
    use crate::spectrum::TransformKind;

    fn small_config() -> AnalysisConfig {
        AnalysisConfig {
            fft_size: 64,
            hop_size: 16,
            ..Default::default()
        }
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(1000, 64, 16), (1000 - 64) / 16);
        assert_eq!(frame_count(64, 64, 16), 0);
        assert_eq!(frame_count(10, 64, 16), 0);
        assert_eq!(frame_count(100, 64, 0), 0);
    }

    #[test]
    fn test_shapes_and_timestamps() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.3).sin()).collect();
        let config = small_config();
        let data =
            compute_frequency_data(&samples, 8000, &config, &mut AnalysisContext::default())
                .unwrap();

        assert_eq!(data.len(), frame_count(1000, 64, 16));
        assert_eq!(data.frequencies.len(), data.time_stamps.len());
        assert!(data.frequencies.iter().all(|s| s.len() == 32));
        assert_eq!(data.time_stamps[0], 0.0);
        assert!((data.time_stamps[1] - 16.0 / 8000.0).abs() < 1e-7);
    }

    #[test]
    fn test_short_signal_is_empty() {
        let data = compute_frequency_data(
            &[0.5; 10],
            8000,
            &small_config(),
            &mut AnalysisContext::default(),
        )
        .unwrap();
        assert!(data.is_empty());
        assert_eq!(data.fft_size, 64);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            fft_size: 100,
            ..Default::default()
        };
        let result =
            compute_frequency_data(&[0.0; 1000], 8000, &config, &mut AnalysisContext::default());
        assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_progress_every_fifty_frames() {
        // 250 frames with fft=64, hop=16
        let len = 64 + 250 * 16;
        let samples = vec![0.1f32; len];
        let mut updates: Vec<Progress> = Vec::new();
        {
            let mut sink = |p: Progress| updates.push(p);
            let mut ctx = AnalysisContext::with_progress(&mut sink);
            compute_frequency_data(&samples, 8000, &small_config(), &mut ctx).unwrap();
        }

        assert_eq!(updates.len(), 5);
        assert!((updates[0].percent - 20.0).abs() < 1e-4);
        assert!((updates[4].percent - 100.0).abs() < 1e-4);
        assert_eq!(updates[4].message, "Processing frame 250/250");
    }

    #[test]
    fn test_cancellation_stops_analysis() {
        let samples = vec![0.1f32; 64 + 500 * 16];
        let token = CancellationToken::new();
        token.cancel();
        let mut ctx = AnalysisContext::default().cancellable(&token);
        let result = compute_frequency_data(&samples, 8000, &small_config(), &mut ctx);
        assert_eq!(result, Err(AnalysisError::Cancelled));
    }

    #[test]
    fn test_rectangular_window_matches_raw_transform() {
        let samples: Vec<f32> = (0..200).map(|i| ((i * 7 % 13) as f32 - 6.0) / 6.0).collect();
        let config = AnalysisConfig {
            fft_size: 64,
            hop_size: 64,
            window: WindowFunction::Rectangular,
            transform: TransformKind::Direct,
            ..Default::default()
        };
        let data =
            compute_frequency_data(&samples, 8000, &config, &mut AnalysisContext::default())
                .unwrap();
        let raw = crate::spectrum::dft::magnitude_spectrum(&samples[..64], TransformKind::Direct);
        assert_eq!(data.frequencies[0], raw);
    }
}
