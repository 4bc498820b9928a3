//! Sample types, per-repaint coalescing, and moving-average smoothing.

use serde::{Deserialize, Serialize};

/// Bounded history length (~2 seconds at 60Hz).
const MAX_BUFFER_LEN: usize = 120;

/// Default centered moving-average window.
const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// One position sample in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: f64,
}

impl GazeSample {
    pub fn new(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self { x, y, timestamp_ms }
    }

    pub fn distance_to(&self, other: &GazeSample) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// =============================================================================
// FrameGate
// =============================================================================

/// At-most-one-pending-frame coalescing gate.
///
/// Samples arriving faster than the repaint rate overwrite the pending slot;
/// only the first submission after a drain asks the caller to schedule a
/// frame callback. This bounds work to one classification pass per repaint
/// regardless of input event rate.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Option<GazeSample>,
    queued: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `sample` as the pending frame input. Returns `true` when the
    /// caller must schedule a frame callback (no callback is in flight yet).
    pub fn submit(&mut self, sample: GazeSample) -> bool {
        self.pending = Some(sample);
        if self.queued {
            false
        } else {
            self.queued = true;
            true
        }
    }

    /// Drain the pending sample at the start of a frame callback.
    pub fn take(&mut self) -> Option<GazeSample> {
        self.queued = false;
        self.pending.take()
    }

    /// Discard any pending sample and mark no frame in flight.
    pub fn cancel(&mut self) {
        self.queued = false;
        self.pending = None;
    }

    pub fn is_queued(&self) -> bool {
        self.queued
    }
}

// =============================================================================
// SampleWindow
// =============================================================================

/// Bounded sample history with centered moving-average smoothing.
#[derive(Debug)]
pub struct SampleWindow {
    buffer: Vec<GazeSample>,
    window: usize,
    max_len: usize,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_WINDOW, MAX_BUFFER_LEN)
    }
}

impl SampleWindow {
    pub fn new(window: usize, max_len: usize) -> Self {
        Self {
            buffer: Vec::new(),
            window: window.max(1),
            max_len: max_len.max(1),
        }
    }

    pub fn push(&mut self, sample: GazeSample) {
        self.buffer.push(sample);
        if self.buffer.len() > self.max_len {
            let excess = self.buffer.len() - self.max_len;
            self.buffer.drain(0..excess);
        }
    }

    /// Moving-average smoothed copy of the buffer. Timestamps are preserved;
    /// only coordinates are averaged over a centered window.
    pub fn smoothed(&self) -> Vec<GazeSample> {
        let len = self.buffer.len();
        if len < 3 {
            return self.buffer.clone();
        }

        let window = self.window.min(len);
        let half = window / 2;
        let mut out = Vec::with_capacity(len);

        for i in 0..len {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(len);
            let slice = &self.buffer[start..end];

            let n = slice.len() as f64;
            let avg_x = slice.iter().map(|p| p.x).sum::<f64>() / n;
            let avg_y = slice.iter().map(|p| p.y).sum::<f64>() / n;

            out.push(GazeSample::new(avg_x, avg_y, self.buffer[i].timestamp_ms));
        }

        out
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
