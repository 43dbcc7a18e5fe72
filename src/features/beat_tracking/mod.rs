//! Beat tracking modules
//!
//! Generate beat positions from a tempo estimate by snapping a regular grid
//! to amplitude-envelope onsets.

pub mod grid;

use crate::features::envelope::AmplitudeData;
use crate::features::onset::detect_envelope_onsets;
use grid::GridBeatTracker;

/// Track beats for a tempo over the envelope onsets of a signal
///
/// # Arguments
///
/// * `bpm` - Tempo estimate; a non-positive value yields no beats
/// * `amplitude` - Amplitude envelope used for onset detection
///
/// # Returns
///
/// Beat times in seconds, each one a detected onset
pub fn track_beats(bpm: f32, amplitude: &AmplitudeData) -> Vec<f32> {
    if bpm <= 0.0 {
        return Vec::new();
    }

    let onsets = detect_envelope_onsets(amplitude);
    GridBeatTracker::new(bpm, onsets).track_beats()
}
