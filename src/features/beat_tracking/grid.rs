//! Onset-snapped beat grid
//!
//! Walks a grid of period `60 / bpm` from the first onset to the last one
//! and snaps every grid point to the nearest onset within 30% of a period.
//! Grid points with no onset in range are skipped. Emitted beats are not
//! deduplicated.

/// Snap tolerance as a fraction of the beat period
pub const SNAP_TOLERANCE: f32 = 0.3;

/// Grid beat tracker
#[derive(Debug, Clone)]
pub struct GridBeatTracker {
    /// BPM estimate
    pub bpm_estimate: f32,

    /// Onset times in seconds, ascending
    pub onsets: Vec<f32>,
}

impl GridBeatTracker {
    /// Create a new grid beat tracker
    pub fn new(bpm_estimate: f32, onsets: Vec<f32>) -> Self {
        Self {
            bpm_estimate,
            onsets,
        }
    }

    /// Beat period in seconds, `None` for a non-positive tempo
    pub fn beat_period(&self) -> Option<f32> {
        if self.bpm_estimate > 0.0 && self.bpm_estimate.is_finite() {
            Some(60.0 / self.bpm_estimate)
        } else {
            None
        }
    }

    /// Nearest onset to `t` within `tolerance` seconds
    fn nearest_onset(&self, t: f32, tolerance: f32) -> Option<f32> {
        // Onsets are sorted: only the two around the insertion point can be nearest
        let idx = self.onsets.partition_point(|&o| o < t);
        let before = idx.checked_sub(1).map(|i| self.onsets[i]);
        let after = self.onsets.get(idx).copied();

        let nearest = match (before, after) {
            (Some(b), Some(a)) => {
                if (t - b).abs() <= (a - t).abs() {
                    b
                } else {
                    a
                }
            }
            (Some(b), None) => b,
            (None, Some(a)) => a,
            (None, None) => return None,
        };

        ((nearest - t).abs() <= tolerance).then_some(nearest)
    }

    /// Track beats along the grid
    ///
    /// # Returns
    ///
    /// Beat times in seconds; empty for a non-positive tempo or no onsets
    pub fn track_beats(&self) -> Vec<f32> {
        let Some(period) = self.beat_period() else {
            return Vec::new();
        };
        let (Some(&first), Some(&last)) = (self.onsets.first(), self.onsets.last()) else {
            return Vec::new();
        };

        let tolerance = SNAP_TOLERANCE * period;
        let mut beats = Vec::new();
        let mut step = 0usize;

        loop {
            let t = first + step as f32 * period;
            if t > last {
                break;
            }
            if let Some(onset) = self.nearest_onset(t, tolerance) {
                beats.push(onset);
            }
            step += 1;
        }

        log::debug!(
            "Beat grid: period={:.3}s, {} onsets, {} beats",
            period,
            self.onsets.len(),
            beats.len()
        );

        beats
    }
}
