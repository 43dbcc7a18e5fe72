//! Envelope peak onset detection
//!
//! Cheaper alternative to spectral flux: an onset is any strict local maximum
//! of the amplitude envelope that exceeds 60% of the envelope maximum.

use super::threshold::{fraction_of_max, strict_local_maxima};
use crate::features::envelope::AmplitudeData;

/// Fraction of the envelope maximum a peak must exceed
pub const ENVELOPE_PEAK_FRACTION: f32 = 0.6;

/// Detect onsets as envelope peaks
///
/// # Returns
///
/// Onset times in seconds, ascending
///
/// # Example
///
/// ```
/// use spectra_dsp::features::envelope::AmplitudeData;
/// use spectra_dsp::features::onset::envelope_peaks::detect_envelope_onsets;
///
/// let amp = AmplitudeData {
///     envelope: vec![0.0, 1.0, 0.2, 0.5, 0.1, 0.9, 0.0],
///     time_stamps: vec![0.0, 0.01, 0.02, 0.03, 0.04, 0.05, 0.06],
///     peak: 1.0,
///     rms: 0.3,
/// };
/// assert_eq!(detect_envelope_onsets(&amp), vec![0.01, 0.05]);
/// ```
pub fn detect_envelope_onsets(amplitude: &AmplitudeData) -> Vec<f32> {
    let threshold = fraction_of_max(&amplitude.envelope, ENVELOPE_PEAK_FRACTION);

    strict_local_maxima(&amplitude.envelope, threshold)
        .into_iter()
        .filter_map(|i| amplitude.time_stamps.get(i).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amplitude(envelope: Vec<f32>) -> AmplitudeData {
        AmplitudeData {
            time_stamps: (0..envelope.len()).map(|i| i as f32 * 0.25).collect(),
            peak: envelope.iter().copied().fold(0.0, f32::max),
            rms: 0.0,
            envelope,
        }
    }

    #[test]
    fn test_peaks_above_threshold() {
        let amp = amplitude(vec![0.0, 0.5, 0.0, 1.0, 0.0, 0.7, 0.0]);
        // 0.5 is below 0.6 * 1.0
        assert_eq!(detect_envelope_onsets(&amp), vec![0.75, 1.25]);
    }

    #[test]
    fn test_silent_envelope() {
        assert!(detect_envelope_onsets(&amplitude(vec![0.0; 50])).is_empty());
        assert!(detect_envelope_onsets(&AmplitudeData::empty()).is_empty());
    }
}
