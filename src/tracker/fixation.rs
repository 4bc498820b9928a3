//! Velocity-threshold (I-VT) fixation detection.
//!
//! Consecutive low-velocity samples are grouped into a fixation; when no
//! contiguous run exists, a dispersion check over the most recent samples
//! catches slow drift that never crosses the velocity threshold.

use serde::{Deserialize, Serialize};

use crate::tracker::GazeSample;

/// Dispersion threshold in pixels; the velocity cutoff is derived from it.
const DEFAULT_THRESHOLD_PX: f64 = 30.0;

/// Fixations shorter than this are reported as no fixation.
const DEFAULT_MIN_DURATION_MS: f64 = 100.0;

/// Velocity cutoff multiplier over the pixel threshold (~900 px/s).
const VELOCITY_FACTOR: f64 = 30.0;

/// How many trailing samples the dispersion fallback inspects.
const DISPERSION_TAIL: usize = 10;

/// A sustained gaze at one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixation {
    pub x: f64,
    pub y: f64,
    pub duration_ms: f64,
    pub start_ms: f64,
    pub end_ms: f64,
}

/// I-VT fixation detector over a smoothed sample slice.
#[derive(Debug, Clone)]
pub struct FixationDetector {
    threshold_px: f64,
    min_duration_ms: f64,
}

impl Default for FixationDetector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_PX, DEFAULT_MIN_DURATION_MS)
    }
}

impl FixationDetector {
    pub fn new(threshold_px: f64, min_duration_ms: f64) -> Self {
        Self {
            threshold_px,
            min_duration_ms,
        }
    }

    /// Detect the current fixation, if any, over `points` (oldest first).
    /// Returns `None` for fixations shorter than the minimum duration.
    pub fn detect(&self, points: &[GazeSample]) -> Option<Fixation> {
        if points.len() < 2 {
            return None;
        }

        let velocity_cutoff = self.threshold_px * VELOCITY_FACTOR;
        let mut run: Vec<GazeSample> = Vec::new();

        for pair in points.windows(2) {
            let dt_ms = (pair[1].timestamp_ms - pair[0].timestamp_ms).max(1.0);
            let velocity = pair[1].distance_to(&pair[0]) / dt_ms * 1000.0;

            if velocity < velocity_cutoff {
                run.push(pair[1]);
            } else if !run.is_empty() {
                break;
            }
        }

        if run.is_empty() {
            run = self.dispersion_fallback(points);
        }

        if run.len() < 2 {
            return None;
        }

        let n = run.len() as f64;
        let cx = run.iter().map(|p| p.x).sum::<f64>() / n;
        let cy = run.iter().map(|p| p.y).sum::<f64>() / n;
        let start_ms = run[0].timestamp_ms;
        let end_ms = run[run.len() - 1].timestamp_ms;
        let duration_ms = end_ms - start_ms;

        if duration_ms < self.min_duration_ms {
            return None;
        }

        Some(Fixation {
            x: cx,
            y: cy,
            duration_ms,
            start_ms,
            end_ms,
        })
    }

    /// The latest samples form a fixation when their max distance from the
    /// centroid stays within the dispersion threshold.
    fn dispersion_fallback(&self, points: &[GazeSample]) -> Vec<GazeSample> {
        let tail_start = points.len().saturating_sub(DISPERSION_TAIL);
        let recent = &points[tail_start..];

        let n = recent.len() as f64;
        let cx = recent.iter().map(|p| p.x).sum::<f64>() / n;
        let cy = recent.iter().map(|p| p.y).sum::<f64>() / n;
        let centroid = GazeSample::new(cx, cy, 0.0);

        let max_dist = recent
            .iter()
            .map(|p| p.distance_to(&centroid))
            .fold(0.0_f64, f64::max);

        if max_dist <= self.threshold_px {
            recent.to_vec()
        } else {
            Vec::new()
        }
    }
}
