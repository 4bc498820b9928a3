//! WordRegion: one cached highlightable unit of text.

use web_sys::Element;

use crate::focus::contrast::Rgb;

/// Where a cached region came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOrigin {
    /// A per-token span created by the external NLP colorizer.
    Colorized,
    /// A span created by the synthetic wrap pass.
    Wrapped,
}

/// A highlightable word element with its cached viewport-space center.
///
/// The element reference is non-owning: the DOM owns the node, and the
/// region is only valid until the next cache invalidation. The inline text
/// color is read once at build time to drive the contrast rule; colorizer
/// updates invalidate the cache through the mutation observer.
pub struct WordRegion {
    pub element: Element,
    pub cx: f64,
    pub cy: f64,
    pub origin: WordOrigin,
    pub text_color: Option<Rgb>,
}

impl WordRegion {
    pub fn center(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }
}

/// Geometric center of a bounding box in viewport coordinates.
pub fn box_center(left: f64, top: f64, width: f64, height: f64) -> (f64, f64) {
    (left + width / 2.0, top + height / 2.0)
}

/// Zero-size filter: detached, display:none, or collapsed elements are
/// excluded from the cache.
pub fn has_area(width: f64, height: f64) -> bool {
    width > 0.0 && height > 0.0
}
