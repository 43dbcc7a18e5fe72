//! Adaptive thresholds for onset peak picking

/// Mean and population standard deviation of `values`
///
/// Returns `(0.0, 0.0)` for an empty slice.
pub fn mean_std(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let variance = values.iter().map(|&v| (v - mean) * (v - mean)).sum::<f32>() / n;
    (mean, variance.sqrt())
}

/// Adaptive threshold `mean(values) + k · stddev(values)`
///
/// # Arguments
///
/// * `values` - Novelty values (e.g. spectral flux)
/// * `k` - Standard deviation multiplier (2.0 for onset detection)
///
/// # Returns
///
/// Threshold value; 0.0 for an empty slice
pub fn adaptive_threshold_mean_std(values: &[f32], k: f32) -> f32 {
    let (mean, std) = mean_std(values);
    mean + k * std
}

/// Fixed fraction of the maximum value
///
/// Returns 0.0 for an empty slice.
pub fn fraction_of_max(values: &[f32], fraction: f32) -> f32 {
    values.iter().copied().fold(0.0f32, f32::max) * fraction
}

/// Indices `i` where `values[i]` exceeds `threshold` and is strictly greater
/// than both neighbours
///
/// The first and last elements never qualify.
pub fn strict_local_maxima(values: &[f32], threshold: f32) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }

    (1..values.len() - 1)
        .filter(|&i| {
            let v = values[i];
            v > threshold && v > values[i - 1] && v > values[i + 1]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_std() {
        let (mean, std) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-6);
        assert!((std - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_adaptive_threshold() {
        let threshold = adaptive_threshold_mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 2.0);
        assert!((threshold - 9.0).abs() < 1e-5);
        assert_eq!(adaptive_threshold_mean_std(&[], 2.0), 0.0);
    }

    #[test]
    fn test_fraction_of_max() {
        assert!((fraction_of_max(&[0.2, 1.0, 0.5], 0.6) - 0.6).abs() < 1e-6);
        assert_eq!(fraction_of_max(&[], 0.6), 0.0);
    }

    #[test]
    fn test_strict_local_maxima() {
        let values = [0.0, 3.0, 1.0, 2.0, 2.0, 0.0, 5.0, 0.0];
        // Plateau at 3-4 is not strict
        assert_eq!(strict_local_maxima(&values, 1.5), vec![1, 6]);
        assert_eq!(strict_local_maxima(&values, 4.0), vec![6]);
        assert!(strict_local_maxima(&[1.0, 2.0], 0.0).is_empty());
    }
}
