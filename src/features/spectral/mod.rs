//! Per-frame spectral descriptors
//!
//! Brightness and timbre summaries derived from [`FrequencyData`](crate::spectrum::FrequencyData)
//! or, for the zero-crossing rate, from the time-domain signal:
//! - Spectral centroid
//! - Spectral rolloff
//! - Zero-crossing rate (pre-emphasized)
//! - Harmonic complexity

pub mod centroid;
pub mod harmonic;
pub mod rolloff;
pub mod zero_crossing;

pub use centroid::spectral_centroid;
pub use harmonic::harmonic_complexity;
pub use rolloff::spectral_rolloff;
pub use zero_crossing::zero_crossing_rate;
