//! LexiCore: Gaze-Contingent Reading Focus Engine
//!
//! A Rust/WASM implementation of the LexiFlow reading-assist overlay: a
//! cursor/gaze-contingent focus effect that highlights words near the
//! reader's point of attention and dims the periphery to reduce visual
//! crowding for dyslexic readers.
//!
//! # Architecture
//!
//! ## Tracker (position stream)
//! - `source.rs` - PointerSource: mousemove -> (x, y, timestamp) samples
//! - `sample.rs` - FrameGate: at-most-one-frame sample coalescing
//! - `fixation.rs` - FixationDetector: I-VT velocity-threshold detection
//!
//! ## Word Index
//! - `segment.rs` - whitespace-run segmentation of text node content
//! - `index.rs` - WordIndex: colorizer tokens / previous wrap / fresh wrap
//! - `observer.rs` - scroll/resize/mutation staleness signals
//!
//! ## Focus Renderer
//! - `zones.rs` - focus/transition/periphery partition per frame
//! - `contrast.rs` - luminance-banded contrast-aware highlight choice
//! - `snapshot.rs` - pre-mutation style snapshots, restore-exact teardown
//! - `renderer.rs` - the per-frame paint algorithm on the rAF budget
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { FocusEngine } from 'lexicore';
//!
//! await init();
//!
//! const engine = new FocusEngine();
//! engine.setIntensity('medium');
//! engine.start();
//! ```

pub mod engine;
pub mod focus;
pub mod tracker;
pub mod words;

pub use engine::*;
pub use focus::*;
pub use tracker::*;
pub use words::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("lexicore v{}", env!("CARGO_PKG_VERSION"))
}
