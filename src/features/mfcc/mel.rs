//! Mel scale and filter bank
//!
//! Filter centres are spaced evenly on the mel scale between 0 Hz and
//! Nyquist (endpoints excluded). Each filter averages the spectrum magnitudes
//! in a symmetric bin window around its centre bin; the half-width is
//! `(spectrum_len / num_filters) / 2` bins.

/// Default number of mel filters
pub const NUM_MEL_FILTERS: usize = 26;

/// Hz to mel: `2595 · log10(1 + hz/700)`
#[inline]
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Mel to Hz: `700 · (10^(mel/2595) - 1)`
#[inline]
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0_f32.powf(mel / 2595.0) - 1.0)
}

/// Precomputed filter bank for one spectrum length and sample rate
#[derive(Debug, Clone)]
pub struct MelFilterBank {
    /// Centre bin of each filter
    centers: Vec<usize>,
    /// Bins on each side of the centre
    half_width: usize,
}

impl MelFilterBank {
    /// Build `num_filters` filters for spectra of `spectrum_len` bins
    ///
    /// `spectrum_len` is `fft_size / 2`, so bin `k` sits at
    /// `k · sample_rate / (2 · spectrum_len)` Hz.
    pub fn new(num_filters: usize, spectrum_len: usize, sample_rate: u32) -> Self {
        if num_filters == 0 || spectrum_len == 0 || sample_rate == 0 {
            return Self {
                centers: Vec::new(),
                half_width: 0,
            };
        }

        let nyquist = sample_rate as f32 / 2.0;
        let bin_hz = nyquist / spectrum_len as f32;
        let mel_max = hz_to_mel(nyquist);

        let centers = (1..=num_filters)
            .map(|i| {
                let mel = mel_max * i as f32 / (num_filters + 1) as f32;
                let bin = (mel_to_hz(mel) / bin_hz).round() as usize;
                bin.min(spectrum_len - 1)
            })
            .collect();

        Self {
            centers,
            half_width: spectrum_len / num_filters / 2,
        }
    }

    /// Number of filters
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Whether the bank has no filters
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Centre bins, ascending
    pub fn centers(&self) -> &[usize] {
        &self.centers
    }

    /// Filter a spectrum, returning one averaged magnitude per filter
    pub fn apply(&self, spectrum: &[f32]) -> Vec<f32> {
        if spectrum.is_empty() {
            return vec![0.0; self.centers.len()];
        }

        let last = spectrum.len() - 1;
        self.centers
            .iter()
            .map(|&center| {
                let start = center.saturating_sub(self.half_width).min(last);
                let end = (center + self.half_width).min(last);
                let window = &spectrum[start..=end];
                window.iter().sum::<f32>() / window.len() as f32
            })
            .collect()
    }
}
