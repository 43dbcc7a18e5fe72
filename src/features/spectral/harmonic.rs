//! Harmonic complexity
//!
//! Rough measure of how much of a frame's energy is organised as a harmonic
//! series above a fundamental.
//!
//! # Algorithm
//!
//! 1. Find the magnitude peak in the fundamental band (80-800 Hz)
//! 2. Predict the bins of harmonics `h = 1..=10` of the peak frequency that
//!    lie inside the spectrum, each with a ±3 bin window
//! 3. Reject the frame (complexity 0) if the peak is zero or does not exceed
//!    [`FUNDAMENTAL_PROMINENCE`] times the median of the off-harmonic bins
//!    (every bin outside the harmonic windows). Broadband noise has no floor
//!    below its peaks and fails here.
//! 4. A harmonic is present if its window sum exceeds 10% of the peak magnitude
//! 5. `complexity = present_count × (present_magnitude / total_magnitude)`

use crate::spectrum::FrequencyData;

/// Lower edge of the fundamental search band (Hz)
pub const FUNDAMENTAL_MIN_HZ: f32 = 80.0;

/// Upper edge of the fundamental search band (Hz)
pub const FUNDAMENTAL_MAX_HZ: f32 = 800.0;

/// Number of harmonics tested, fundamental included
pub const MAX_HARMONICS: usize = 10;

/// Half-width of the summation window around each harmonic (bins)
pub const HARMONIC_HALF_WIDTH: usize = 3;

/// Fraction of the peak magnitude a harmonic window must exceed
pub const HARMONIC_PRESENCE_RATIO: f32 = 0.1;

/// Required ratio between the fundamental peak and the off-harmonic median
pub const FUNDAMENTAL_PROMINENCE: f32 = 8.0;

fn median(values: &mut [f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) * 0.5
    } else {
        values[mid]
    }
}

/// Harmonic complexity of one spectrum
///
/// `bin_hz` is the width of one bin (`sample_rate / fft_size`).
pub fn frame_harmonic_complexity(spectrum: &[f32], bin_hz: f32) -> f32 {
    if spectrum.is_empty() || bin_hz <= 0.0 {
        return 0.0;
    }

    let lo = (FUNDAMENTAL_MIN_HZ / bin_hz).ceil() as usize;
    let hi = ((FUNDAMENTAL_MAX_HZ / bin_hz).floor() as usize).min(spectrum.len() - 1);
    if lo > hi {
        return 0.0;
    }

    let band = &spectrum[lo..=hi];
    let (peak_offset, peak_mag) = band
        .iter()
        .copied()
        .enumerate()
        .fold((0usize, 0.0f32), |best, (i, m)| if m > best.1 { (i, m) } else { best });

    if peak_mag <= 0.0 {
        return 0.0;
    }

    let fundamental_hz = (lo + peak_offset) as f32 * bin_hz;
    let windows: Vec<(usize, usize)> = (1..=MAX_HARMONICS)
        .map(|h| (h as f32 * fundamental_hz / bin_hz).round() as usize)
        .take_while(|&bin| bin < spectrum.len())
        .map(|bin| {
            (
                bin.saturating_sub(HARMONIC_HALF_WIDTH),
                (bin + HARMONIC_HALF_WIDTH).min(spectrum.len() - 1),
            )
        })
        .collect();

    let mut off_harmonic: Vec<f32> = spectrum
        .iter()
        .enumerate()
        .filter(|(i, _)| !windows.iter().any(|&(start, end)| (start..=end).contains(i)))
        .map(|(_, &m)| m)
        .collect();
    if peak_mag <= FUNDAMENTAL_PROMINENCE * median(&mut off_harmonic) {
        return 0.0;
    }

    let total: f32 = spectrum.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let mut present = 0usize;
    let mut present_magnitude = 0.0f32;

    for &(start, end) in &windows {
        let window_sum: f32 = spectrum[start..=end].iter().sum();
        if window_sum > HARMONIC_PRESENCE_RATIO * peak_mag {
            present += 1;
            present_magnitude += window_sum;
        }
    }

    present as f32 * (present_magnitude / total)
}

/// Harmonic complexity of every frame
pub fn harmonic_complexity(data: &FrequencyData) -> Vec<f32> {
    let bin_hz = data.bin_resolution();
    data.frequencies
        .iter()
        .map(|spectrum| frame_harmonic_complexity(spectrum, bin_hz))
        .collect()
}
