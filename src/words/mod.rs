//! Word Index: discovery and caching of highlightable word regions.
//!
//! - `segment.rs` - pure whitespace-run segmentation of text node content
//! - `region.rs` - WordRegion (cached element + viewport center + origin)
//! - `index.rs` - WordIndex: 3-branch discovery, lazy rebuild, unwrap teardown
//! - `observer.rs` - InvalidationObserver: scroll/resize/mutation staleness
//!
//! The cache is rebuilt wholesale, never patched: any layout-invalidating
//! event marks it stale and the next read performs a synchronous rebuild.

pub mod index;
pub mod observer;
pub mod region;
pub mod segment;

pub use index::*;
pub use observer::*;
pub use region::*;
pub use segment::*;

/// Marker class the external NLP colorizer puts on its per-token spans.
/// Read-only contract: lexicore never creates or removes these elements.
pub const COLOR_TOKEN_CLASS: &str = "lexi-token";

/// Marker class for spans created by the synthetic wrap pass. Owned by the
/// word index and unwrapped on teardown.
pub const WORD_CLASS: &str = "lexi-word";

#[cfg(test)]
mod tests;
