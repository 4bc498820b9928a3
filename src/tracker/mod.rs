//! Gaze/pointer tracking: the position stream feeding the focus renderer.
//!
//! - `source.rs` - PointerSource: raw mousemove -> (x, y, timestamp) callbacks
//! - `sample.rs` - GazeSample, FrameGate (per-repaint coalescing), SampleWindow (smoothing)
//! - `fixation.rs` - FixationDetector: I-VT velocity-threshold fixation detection
//!
//! The source emits raw samples at native event rate and performs no filtering
//! of its own; smoothing and fixation detection live in `GazeTracker` so the
//! source stays swappable (a webcam gaze estimator feeds the same path through
//! `FocusEngine::pushSample`).

pub mod fixation;
pub mod sample;
pub mod source;

pub use fixation::*;
pub use sample::*;
pub use source::*;

/// Stateful sample pipeline between a position source and the renderer.
///
/// Owns the bounded sample buffer and the fixation detector. `ingest` returns
/// the sample the renderer should paint with (smoothed when enabled) plus the
/// current fixation duration in milliseconds (0 when no fixation holds).
pub struct GazeTracker {
    window: SampleWindow,
    detector: FixationDetector,
    smoothing: bool,
    last_fixation_ms: f64,
}

impl GazeTracker {
    pub fn new(smoothing: bool) -> Self {
        Self {
            window: SampleWindow::default(),
            detector: FixationDetector::default(),
            smoothing,
            last_fixation_ms: 0.0,
        }
    }

    pub fn set_smoothing(&mut self, smoothing: bool) {
        self.smoothing = smoothing;
    }

    /// Feed one raw sample, returning (paint sample, fixation duration ms).
    pub fn ingest(&mut self, x: f64, y: f64, timestamp_ms: f64) -> (GazeSample, f64) {
        let raw = GazeSample::new(x, y, timestamp_ms);
        self.window.push(raw);

        let smoothed = self.window.smoothed();
        let fixation_ms = self
            .detector
            .detect(&smoothed)
            .map(|f| f.duration_ms)
            .unwrap_or(0.0);

        let sample = if self.smoothing {
            smoothed.last().copied().unwrap_or(raw)
        } else {
            raw
        };

        self.last_fixation_ms = fixation_ms;
        (sample, fixation_ms)
    }

    /// Duration of the fixation as of the most recent sample, 0 when none.
    pub fn fixation_ms(&self) -> f64 {
        self.last_fixation_ms
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.last_fixation_ms = 0.0;
    }
}
