//! # Spectra DSP
//!
//! Spectral analysis and feature extraction for mono audio buffers: frequency
//! content over time, amplitude envelope, and higher-level musical
//! descriptors (tempo, beats, timbre, cepstral coefficients).
//!
//! ## Features
//!
//! - **Spectrogram**: windowed short-time transform (FFT or reference DFT)
//! - **Envelope**: 10 ms peak envelope with overall peak and RMS
//! - **Spectral descriptors**: centroid, rolloff, zero-crossing rate, harmonic complexity
//! - **MFCC**: 26-filter mel bank with 13 cosine coefficients per frame
//! - **Rhythm**: spectral-flux onsets, autocorrelation tempo, onset-snapped beat grid
//!
//! ## Quick Start
//!
//! ```no_run
//! use spectra_dsp::{analyze_audio, AnalysisConfig, AnalysisContext};
//!
//! // Load audio samples (mono, f32, normalized)
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let sample_rate = 44100;
//!
//! let result = analyze_audio(
//!     &samples,
//!     sample_rate,
//!     &AnalysisConfig::default(),
//!     &mut AnalysisContext::default(),
//! )?;
//!
//! println!("Tempo: {:.2} BPM, {} beats", result.features.tempo, result.features.beats.len());
//! # Ok::<(), spectra_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Samples → Segmenter (window + transform) → Spectral descriptors / MFCC / Onsets
//!                                                         ↓
//!         → Envelope ──────────────────────────→ Tempo → Beat grid
//! ```
//!
//! The [`worker`] module wraps these calls in a request/response boundary
//! running on its own thread.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod preprocessing;
pub mod progress;
pub mod spectrum;
pub mod worker;

use std::time::{Instant, SystemTime, UNIX_EPOCH};

// Re-export main types
pub use analysis::metadata::AnalysisMetadata;
pub use analysis::result::{
    AudioFeatures, ExtractedFeatures, FeatureSet, ProcessedFrame, UNKNOWN_KEY,
};
pub use config::{AnalysisConfig, ConfigOverrides};
pub use error::AnalysisError;
pub use features::envelope::AmplitudeData;
pub use preprocessing::window::WindowFunction;
pub use progress::{AnalysisContext, CancellationToken, Progress, ProgressSink};
pub use spectrum::{FrequencyData, TransformKind};

use features::envelope::extract_amplitude;
use features::period::{estimate_tempo, TempoEstimate};
use spectrum::dft::SpectrumTransform;
use spectrum::segmenter::compute_frequency_data;

fn validate_input(samples: &[f32], sample_rate: u32) -> Result<(), AnalysisError> {
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput("Invalid sample rate: 0".to_string()));
    }

    if let Some(pos) = samples.iter().position(|x| !x.is_finite()) {
        return Err(AnalysisError::NumericalError(format!(
            "Non-finite sample at index {}",
            pos
        )));
    }

    Ok(())
}

/// Everything a full analysis produces before it is packaged
struct PipelineOutput {
    frequency: FrequencyData,
    amplitude: AmplitudeData,
    features: FeatureSet,
    tempo: TempoEstimate,
}

fn run_pipeline(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
    ctx: &mut AnalysisContext<'_>,
) -> Result<PipelineOutput, AnalysisError> {
    validate_input(samples, sample_rate)?;
    config.validate()?;

    let frequency = compute_frequency_data(samples, sample_rate, config, ctx)?;
    let amplitude = extract_amplitude(samples, sample_rate);

    let spectral_centroid = features::spectral::spectral_centroid(&frequency);
    let spectral_rolloff =
        features::spectral::spectral_rolloff(&frequency, config.rolloff_threshold);
    let zero_crossing_rate = features::spectral::zero_crossing_rate(samples, sample_rate);
    let harmonic_complexity = features::spectral::harmonic_complexity(&frequency);
    let mfcc = features::mfcc::compute_mfcc(&frequency);

    let tempo = estimate_tempo(&frequency, &amplitude);
    let beats = features::beat_tracking::track_beats(tempo.bpm, &amplitude);

    log::debug!(
        "Features: {} frames, {} ZCR windows, tempo {:.2} BPM ({:?}), {} beats",
        frequency.len(),
        zero_crossing_rate.len(),
        tempo.bpm,
        tempo.method,
        beats.len()
    );

    Ok(PipelineOutput {
        features: FeatureSet {
            spectral_centroid,
            spectral_rolloff,
            zero_crossing_rate,
            harmonic_complexity,
            mfcc,
            tempo: tempo.bpm,
            beats,
            key: UNKNOWN_KEY.to_string(),
        },
        frequency,
        amplitude,
        tempo,
    })
}

/// Main analysis function
///
/// Computes the spectrogram, amplitude envelope and every derived feature of
/// a mono signal.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `config` - Analysis configuration parameters
/// * `ctx` - Optional progress sink and cancellation token
///
/// # Returns
///
/// `AudioFeatures`; degenerate signals (empty, silent, shorter than one
/// frame) yield empty or zero-valued features rather than an error
///
/// # Errors
///
/// Returns `AnalysisError` if the sample rate is 0, a sample is not finite,
/// the configuration is invalid, or the analysis was cancelled
///
/// # Example
///
/// ```
/// use spectra_dsp::{analyze_audio, AnalysisConfig, AnalysisContext};
///
/// let samples = vec![0.0f32; 44100]; // 1 second of silence
/// let result = analyze_audio(&samples, 44100, &AnalysisConfig::default(), &mut AnalysisContext::default())?;
/// assert_eq!(result.features.tempo, 0.0);
/// assert!(result.features.beats.is_empty());
/// # Ok::<(), spectra_dsp::AnalysisError>(())
/// ```
pub fn analyze_audio(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
    ctx: &mut AnalysisContext<'_>,
) -> Result<AudioFeatures, AnalysisError> {
    let start_time = Instant::now();

    log::debug!(
        "Starting audio analysis: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let output = run_pipeline(samples, sample_rate, config, ctx)?;

    let metadata = AnalysisMetadata {
        duration_seconds: samples.len() as f32 / sample_rate as f32,
        sample_rate,
        processing_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
        frame_count: output.frequency.len(),
        onset_count: output.tempo.onset_count,
        tempo_method: output.tempo.method,
        ..Default::default()
    };

    log::debug!("Analysis finished in {:.2} ms", metadata.processing_time_ms);

    Ok(AudioFeatures {
        frequency_data: output.frequency,
        amplitude_data: output.amplitude,
        features: output.features,
        metadata,
    })
}

/// Feature-only extraction
///
/// Same pipeline as [`analyze_audio`], returning the derived features and the
/// spectrogram without the amplitude envelope or metadata.
///
/// # Errors
///
/// Same conditions as [`analyze_audio`]
pub fn extract_features(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
    ctx: &mut AnalysisContext<'_>,
) -> Result<ExtractedFeatures, AnalysisError> {
    log::debug!(
        "Extracting features: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );
    let output = run_pipeline(samples, sample_rate, config, ctx)?;
    Ok(ExtractedFeatures {
        frequency_data: output.frequency,
        features: output.features,
    })
}

/// Realtime single-frame processing
///
/// Windows and transforms one frame with no aggregation. The frame is
/// zero-padded or truncated to `config.fft_size`.
///
/// # Errors
///
/// Returns `AnalysisError` if the configuration is invalid or a sample is
/// not finite
///
/// # Example
///
/// ```
/// use spectra_dsp::{process_frame, AnalysisConfig};
///
/// let frame = vec![0.25f32; 2048];
/// let processed = process_frame(&frame, &AnalysisConfig::default())?;
/// assert_eq!(processed.spectrum.len(), 1024);
/// assert_eq!(processed.amplitude.len(), 2048);
/// # Ok::<(), spectra_dsp::AnalysisError>(())
/// ```
pub fn process_frame(frame: &[f32], config: &AnalysisConfig) -> Result<ProcessedFrame, AnalysisError> {
    config.validate()?;
    if let Some(pos) = frame.iter().position(|x| !x.is_finite()) {
        return Err(AnalysisError::NumericalError(format!(
            "Non-finite sample at index {}",
            pos
        )));
    }

    let mut padded = vec![0.0f32; config.fft_size];
    let n = frame.len().min(config.fft_size);
    padded[..n].copy_from_slice(&frame[..n]);

    let coefficients = config.window.coefficients(config.fft_size);
    let mut windowed = vec![0.0f32; config.fft_size];
    preprocessing::window::apply_coefficients(&padded, &coefficients, &mut windowed);

    let spectrum = SpectrumTransform::new(config.transform, config.fft_size).magnitudes(&windowed);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0);

    Ok(ProcessedFrame {
        spectrum,
        amplitude: frame.to_vec(),
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sample_rate_rejected() {
        let result = analyze_audio(&[0.0; 100], 0, &AnalysisConfig::default(), &mut AnalysisContext::default());
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut samples = vec![0.0f32; 100];
        samples[42] = f32::NAN;
        let result = extract_features(&samples, 44100, &AnalysisConfig::default(), &mut AnalysisContext::default());
        assert!(matches!(result, Err(AnalysisError::NumericalError(_))));
    }

    #[test]
    fn test_empty_signal_gives_empty_features() {
        let result = analyze_audio(&[], 44100, &AnalysisConfig::default(), &mut AnalysisContext::default()).unwrap();
        assert!(result.frequency_data.frequencies.is_empty());
        assert!(result.amplitude_data.envelope.is_empty());
        assert!(result.features.spectral_centroid.is_empty());
        assert!(result.features.mfcc.is_empty());
        assert_eq!(result.features.tempo, 0.0);
        assert_eq!(result.features.key, UNKNOWN_KEY);
        assert_eq!(result.metadata.tempo_method, features::period::TempoMethod::None);
    }

    #[test]
    fn test_process_frame_pads_short_frames() {
        let config = AnalysisConfig {
            fft_size: 256,
            hop_size: 128,
            ..Default::default()
        };
        let processed = process_frame(&[0.5; 100], &config).unwrap();
        assert_eq!(processed.spectrum.len(), 128);
        assert_eq!(processed.amplitude.len(), 100);
        assert!(processed.timestamp > 0.0);
    }

    #[test]
    fn test_process_frame_rejects_bad_config() {
        let config = AnalysisConfig {
            fft_size: 300,
            ..Default::default()
        };
        assert!(process_frame(&[0.0; 300], &config).is_err());
    }
}
