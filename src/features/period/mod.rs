//! Period estimation modules
//!
//! Convert onsets to a single tempo estimate using:
//! - Autocorrelation of a spectral-flux onset impulse train (primary)
//! - Mean inter-peak interval of the amplitude envelope (sparse fallback)

pub mod autocorrelation;
pub mod interval;

use serde::{Deserialize, Serialize};

use crate::features::envelope::AmplitudeData;
use crate::features::onset::{detect_envelope_onsets, detect_spectral_flux_onsets};
use crate::spectrum::FrequencyData;

/// Envelope windows required before a tempo is attempted (1 s at 10 ms windows)
pub const MIN_ENVELOPE_LEN: usize = 100;

/// Spectral-flux onsets required for the autocorrelation path
pub const MIN_AUTOCORRELATION_ONSETS: usize = 4;

/// Which estimator produced the tempo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TempoMethod {
    /// Signal too short; no estimate attempted
    #[default]
    None,
    /// Mean interval between envelope peaks
    IntervalFallback,
    /// Autocorrelation of spectral-flux onsets
    Autocorrelation,
}

/// Tempo estimate
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempoEstimate {
    /// Tempo in BPM, 0.0 if undetermined
    pub bpm: f32,
    /// Estimator used
    pub method: TempoMethod,
    /// Onsets fed to the estimator
    pub onset_count: usize,
}

/// Estimate the tempo of an analysed signal
///
/// # Arguments
///
/// * `frequency` - Magnitude spectrogram (spectral-flux onsets)
/// * `amplitude` - Amplitude envelope (length gate and fallback onsets)
///
/// # Returns
///
/// `TempoEstimate` whose `bpm` is 0.0 when the signal is too short or no
/// periodicity was found
pub fn estimate_tempo(frequency: &FrequencyData, amplitude: &AmplitudeData) -> TempoEstimate {
    if amplitude.envelope.len() < MIN_ENVELOPE_LEN {
        log::debug!(
            "Envelope too short for tempo ({} < {} windows)",
            amplitude.envelope.len(),
            MIN_ENVELOPE_LEN
        );
        return TempoEstimate::default();
    }

    let onsets = detect_spectral_flux_onsets(frequency);

    if onsets.len() < MIN_AUTOCORRELATION_ONSETS {
        let peaks = detect_envelope_onsets(amplitude);
        let bpm = interval::estimate_bpm_from_intervals(&peaks);
        log::debug!(
            "Only {} flux onsets, interval fallback over {} envelope peaks: {:.2} BPM",
            onsets.len(),
            peaks.len(),
            bpm
        );
        return TempoEstimate {
            bpm,
            method: TempoMethod::IntervalFallback,
            onset_count: peaks.len(),
        };
    }

    let bpm = autocorrelation::estimate_bpm_from_autocorrelation(&onsets);
    log::debug!("Autocorrelation over {} onsets: {:.2} BPM", onsets.len(), bpm);

    TempoEstimate {
        bpm,
        method: TempoMethod::Autocorrelation,
        onset_count: onsets.len(),
    }
}
