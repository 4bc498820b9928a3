//! Focus Renderer: per-frame zone classification and style mutation.
//!
//! - `config.rs` - intensity presets and radii/alpha derivation
//! - `zones.rs` - Euclidean zone partition (focus/transition/periphery)
//! - `contrast.rs` - luminance-banded highlight color selection
//! - `snapshot.rs` - pre-mutation style snapshots, restore-exact bookkeeping
//! - `overlay.rs` - periphery dimming overlay + cursor-following indicator
//! - `renderer.rs` - frame scheduling and the per-frame paint algorithm

pub mod config;
pub mod contrast;
pub mod overlay;
pub mod renderer;
pub mod snapshot;
pub mod zones;

pub use config::*;
pub use contrast::*;
pub use overlay::*;
pub use renderer::*;
pub use snapshot::*;
pub use zones::*;

#[cfg(test)]
mod tests;
