//! Zero-crossing rate on a pre-emphasized signal
//!
//! The signal is cut into 25 ms windows with 50% overlap. Within a window,
//! each sample pair `(j-1, j)` is compared after pre-emphasis
//! `y[n] = x[n] - 0.97·x[n-1]`:
//!
//! - current: `x[j] - 0.97·x[j-1]`
//! - previous: `x[j-1] - 0.97·x[max(j-2, 0)]`
//!
//! The clamp at index 0 is part of the discretization: at `j = 1` the previous
//! term becomes `0.03·x[0]`. A sign change between the two terms counts as one
//! crossing and the window rate is `crossings · sample_rate / window_size`
//! (crossings per second).

/// Pre-emphasis coefficient
pub const PRE_EMPHASIS: f32 = 0.97;

/// Analysis window duration in seconds
pub const ZCR_WINDOW_SECONDS: f32 = 0.025;

#[inline]
fn emphasized(samples: &[f32], j: usize) -> f32 {
    let lag = samples[j.saturating_sub(1)];
    samples[j] - PRE_EMPHASIS * lag
}

/// Zero-crossing rate (crossings per second) per 25 ms window
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// One rate per window; empty when the signal is shorter than one window
///
/// # Example
///
/// ```
/// use spectra_dsp::features::spectral::zero_crossing_rate;
///
/// let sr = 8000;
/// let samples: Vec<f32> = (0..sr)
///     .map(|i| (2.0 * std::f32::consts::PI * 100.0 * i as f32 / sr as f32).sin())
///     .collect();
/// let zcr = zero_crossing_rate(&samples, sr as u32);
/// assert!(zcr.iter().all(|&r| (r - 200.0).abs() <= 40.0));
/// ```
pub fn zero_crossing_rate(samples: &[f32], sample_rate: u32) -> Vec<f32> {
    let window_size = (sample_rate as f32 * ZCR_WINDOW_SECONDS) as usize;
    let hop_size = window_size / 2;

    if window_size < 2 || hop_size == 0 || samples.len() < window_size {
        return Vec::new();
    }

    let num_windows = (samples.len() - window_size) / hop_size + 1;
    let mut rates = Vec::with_capacity(num_windows);

    for w in 0..num_windows {
        let start = w * hop_size;
        let end = start + window_size;
        let mut crossings = 0u32;

        for j in (start + 1)..end {
            let current = emphasized(samples, j);
            let previous = emphasized(samples, j - 1);
            if (current >= 0.0) != (previous >= 0.0) {
                crossings += 1;
            }
        }

        rates.push(crossings as f32 * sample_rate as f32 / window_size as f32);
    }

    rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq: f32, sr: u32, seconds: f32) -> Vec<f32> {
        let n = (sr as f32 * seconds) as usize;
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f32 / sr as f32).sin())
            .collect()
    }

    #[test]
    fn test_sine_crossing_rate() {
        let sr = 44100;
        let zcr = zero_crossing_rate(&sine(440.0, sr, 1.0), sr);
        assert!(!zcr.is_empty());
        let mean = zcr.iter().sum::<f32>() / zcr.len() as f32;
        assert!((mean - 880.0).abs() < 50.0, "mean zcr {}", mean);
    }

    #[test]
    fn test_window_count() {
        // 200-sample windows, 100-sample hop
        let samples = vec![0.0f32; 1000];
        let zcr = zero_crossing_rate(&samples, 8000);
        assert_eq!(zcr.len(), (1000 - 200) / 100 + 1);
    }

    #[test]
    fn test_silence_has_no_crossings() {
        let zcr = zero_crossing_rate(&vec![0.0f32; 8000], 8000);
        assert!(zcr.iter().all(|&r| r == 0.0));
    }

    #[test]
    fn test_first_pair_uses_clamped_lag() {
        // x[0] = 1, x[1] = 1: previous = 0.03 (positive), current = 0.03 (positive)
        // x[2] = -1: current = -1.97 (negative) -> one crossing
        let mut samples = vec![1.0f32, 1.0, -1.0];
        samples.extend(std::iter::repeat(-1.0).take(197));
        let zcr = zero_crossing_rate(&samples, 8000);
        assert_eq!(zcr.len(), 1);
        assert_eq!(zcr[0], 8000.0 / 200.0);
    }

    #[test]
    fn test_short_signal_is_empty() {
        assert!(zero_crossing_rate(&[0.1; 10], 8000).is_empty());
        assert!(zero_crossing_rate(&[], 44100).is_empty());
    }
}
