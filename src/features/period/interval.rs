//! Inter-onset interval tempo estimate
//!
//! Fallback for sparse material: the mean spacing between consecutive
//! envelope peaks is taken as the beat period.

/// Estimate tempo from the mean interval between `onsets`
///
/// # Returns
///
/// `60 / mean_interval` in BPM; 0.0 with fewer than two onsets or a zero
/// mean interval
pub fn estimate_bpm_from_intervals(onsets: &[f32]) -> f32 {
    if onsets.len() < 2 {
        return 0.0;
    }

    let intervals: Vec<f32> = onsets.windows(2).map(|w| w[1] - w[0]).collect();
    let mean = intervals.iter().sum::<f32>() / intervals.len() as f32;

    if mean <= 0.0 {
        return 0.0;
    }

    60.0 / mean
}
