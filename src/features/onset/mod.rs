//! Onset detection modules
//!
//! Two detectors with different cost/accuracy trade-offs:
//! - Spectral flux with adaptive mean + 2σ threshold (primary)
//! - Amplitude envelope peaks (secondary, used by the beat tracker and the
//!   sparse-onset tempo fallback)

pub mod envelope_peaks;
pub mod spectral_flux;
pub mod threshold;

pub use envelope_peaks::detect_envelope_onsets;
pub use spectral_flux::detect_spectral_flux_onsets;
