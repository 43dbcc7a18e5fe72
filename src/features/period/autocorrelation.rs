//! Autocorrelation-based tempo estimation
//!
//! Finds the dominant periodicity of an onset list.
//!
//! # Algorithm
//!
//! 1. Render the onsets as a binary impulse signal at 100 Hz, spanning the
//!    first to the last onset (sample `round((t - t_first) · 100)` is 1)
//! 2. Compute the autocorrelation `ACF[lag] = Σ_i s[i] · s[i + lag]` for
//!    lags `1..=min(len / 2, 200)`
//! 3. Search lags corresponding to 60-200 BPM for the largest positive value
//! 4. `BPM = 60 · 100 / lag`
//!
//! # Reference
//!
//! Ellis, D. P. W., & Pikrakis, A. (2006). Real-time Beat Induction.
//! *Proceedings of the International Conference on Music Information Retrieval*.

/// Virtual sample rate of the impulse signal (Hz)
pub const IMPULSE_RATE: f32 = 100.0;

/// Largest lag evaluated
pub const MAX_LAG: usize = 200;

/// Slowest tempo searched (BPM)
pub const MIN_BPM: f32 = 60.0;

/// Fastest tempo searched (BPM)
pub const MAX_BPM: f32 = 200.0;

/// Render onset times as a binary impulse train at [`IMPULSE_RATE`]
///
/// Onsets are assumed ascending. Returns an empty signal for no onsets.
pub fn onset_impulse_signal(onsets: &[f32]) -> Vec<f32> {
    let (Some(&first), Some(&last)) = (onsets.first(), onsets.last()) else {
        return Vec::new();
    };

    let length = ((last - first).max(0.0) * IMPULSE_RATE).round() as usize + 1;
    let mut signal = vec![0.0f32; length];
    for &t in onsets {
        let idx = ((t - first) * IMPULSE_RATE).round() as usize;
        if idx < length {
            signal[idx] = 1.0;
        }
    }
    signal
}

/// Autocorrelation of `signal` for lags `0..=max_lag`
///
/// Entries beyond the signal length are zero.
pub fn autocorrelation(signal: &[f32], max_lag: usize) -> Vec<f32> {
    (0..=max_lag)
        .map(|lag| {
            if lag >= signal.len() {
                return 0.0;
            }
            signal[..signal.len() - lag]
                .iter()
                .zip(&signal[lag..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect()
}

/// Estimate tempo from onset times by autocorrelation
///
/// # Arguments
///
/// * `onsets` - Onset times in seconds, ascending
///
/// # Returns
///
/// Tempo in BPM, or 0.0 when no positive correlation exists in the
/// 60-200 BPM lag range
///
/// # Example
///
/// ```
/// use spectra_dsp::features::period::autocorrelation::estimate_bpm_from_autocorrelation;
///
/// let onsets: Vec<f32> = (0..16).map(|i| i as f32 * 0.5).collect();
/// let bpm = estimate_bpm_from_autocorrelation(&onsets);
/// assert!((bpm - 120.0).abs() < 1.0);
/// ```
pub fn estimate_bpm_from_autocorrelation(onsets: &[f32]) -> f32 {
    let signal = onset_impulse_signal(onsets);
    let max_lag = (signal.len() / 2).min(MAX_LAG);
    if max_lag == 0 {
        return 0.0;
    }

    let acf = autocorrelation(&signal, max_lag);

    let lag_min = ((60.0 * IMPULSE_RATE) / MAX_BPM).ceil() as usize;
    let lag_max = (((60.0 * IMPULSE_RATE) / MIN_BPM).floor() as usize).min(max_lag);

    let mut best_lag = 0usize;
    let mut best_value = 0.0f32;
    for lag in lag_min.max(1)..=lag_max {
        if acf[lag] > best_value {
            best_value = acf[lag];
            best_lag = lag;
        }
    }

    log::debug!(
        "Autocorrelation: {} onsets, signal length {}, lags [{}, {}], best lag {} ({:.1})",
        onsets.len(),
        signal.len(),
        lag_min,
        lag_max,
        best_lag,
        best_value
    );

    if best_lag == 0 {
        return 0.0;
    }

    60.0 * IMPULSE_RATE / best_lag as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_signal() {
        let signal = onset_impulse_signal(&[1.0, 1.5, 2.0]);
        assert_eq!(signal.len(), 101);
        assert_eq!(signal[0], 1.0);
        assert_eq!(signal[50], 1.0);
        assert_eq!(signal[100], 1.0);
        assert_eq!(signal.iter().sum::<f32>(), 3.0);
        assert!(onset_impulse_signal(&[]).is_empty());
    }

    #[test]
    fn test_autocorrelation_of_pulse_train() {
        let mut signal = vec![0.0f32; 20];
        for i in (0..20).step_by(5) {
            signal[i] = 1.0;
        }
        let acf = autocorrelation(&signal, 10);
        assert_eq!(acf.len(), 11);
        assert_eq!(acf[0], 4.0);
        assert_eq!(acf[5], 3.0);
        assert_eq!(acf[10], 2.0);
        assert_eq!(acf[3], 0.0);
    }

    #[test]
    fn test_autocorrelation_lag_beyond_signal() {
        let acf = autocorrelation(&[1.0, 1.0], 4);
        assert_eq!(acf, vec![2.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_120_bpm() {
        let onsets: Vec<f32> = (0..20).map(|i| i as f32 * 0.5).collect();
        let bpm = estimate_bpm_from_autocorrelation(&onsets);
        assert!((bpm - 120.0).abs() < 1e-3, "got {}", bpm);
    }

    #[test]
    fn test_90_bpm_with_jitter() {
        let onsets: Vec<f32> = (0..24)
            .map(|i| i as f32 * (60.0 / 90.0) + if i % 2 == 0 { 0.004 } else { -0.004 })
            .collect();
        let bpm = estimate_bpm_from_autocorrelation(&onsets);
        assert!((bpm - 90.0).abs() < 5.0, "got {}", bpm);
    }

    #[test]
    fn test_short_span_has_no_tempo() {
        // Span of 0.2 s: lags only up to 10, below the 60-200 BPM range
        let bpm = estimate_bpm_from_autocorrelation(&[0.0, 0.1, 0.2]);
        assert_eq!(bpm, 0.0);
    }
}
