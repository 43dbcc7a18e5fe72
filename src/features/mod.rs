//! Feature extraction modules
//!
//! This module contains all feature extraction algorithms:
//! - Amplitude envelope
//! - Spectral descriptors (centroid, rolloff, zero-crossing rate, harmonic complexity)
//! - Mel-frequency cepstral coefficients
//! - Onset detection (spectral flux + envelope peaks)
//! - Period estimation (tempo)
//! - Beat tracking

pub mod beat_tracking;
pub mod envelope;
pub mod mfcc;
pub mod onset;
pub mod period;
pub mod spectral;
