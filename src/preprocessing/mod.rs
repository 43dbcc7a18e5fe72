//! Frame preprocessing
//!
//! Utilities applied to sample frames before spectral analysis:
//! - Window functions (rectangular, Hann, Hamming, Blackman)

pub mod window;
