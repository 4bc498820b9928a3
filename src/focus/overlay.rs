//! Injected visual elements: the periphery dimming overlay and the small
//! cursor-following focus indicator. Both are pointer-events: none and live
//! outside the word cache's exclusion set by id.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

pub const OVERLAY_ID: &str = "lexi-periphery-overlay";
pub const INDICATOR_ID: &str = "lexi-focus-indicator";

/// Overlay tint color (near-black blue-grey).
const TINT: (u8, u8, u8) = (15, 18, 26);

/// Full-viewport radial-gradient CSS for the periphery dimming effect:
/// fully transparent from the sample point out to half the transition
/// radius, fading to the tint at the transition radius and beyond.
pub fn gradient_css(x: f64, y: f64, transition_radius: f64, alpha: f64) -> String {
    let inner = transition_radius / 2.0;
    let (r, g, b) = TINT;
    format!(
        "radial-gradient(circle at {x:.1}px {y:.1}px, \
         rgba({r}, {g}, {b}, 0) 0px, \
         rgba({r}, {g}, {b}, 0) {inner:.1}px, \
         rgba({r}, {g}, {b}, {alpha:.3}) {transition_radius:.1}px, \
         rgba({r}, {g}, {b}, {alpha:.3}) 100%)"
    )
}

fn create_fixed_element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    let element = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("created element is not an HtmlElement"))?;
    element.set_id(id);
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&element)?;
    Ok(element)
}

// =============================================================================
// PeripheryOverlay
// =============================================================================

/// The full-viewport dimming layer. Repainted every frame while active.
pub struct PeripheryOverlay {
    element: Option<HtmlElement>,
}

impl Default for PeripheryOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl PeripheryOverlay {
    pub fn new() -> Self {
        Self { element: None }
    }

    /// Create and inject the overlay element if not present.
    pub fn ensure(&mut self, document: &Document) -> Result<(), JsValue> {
        if self.element.is_some() {
            return Ok(());
        }
        let element = create_fixed_element(document, OVERLAY_ID)?;
        element.style().set_css_text(
            "position: fixed; inset: 0; pointer-events: none; \
             z-index: 2147483646; display: none;",
        );
        self.element = Some(element);
        Ok(())
    }

    /// Repaint the gradient for the current sample point.
    pub fn paint(&self, x: f64, y: f64, transition_radius: f64, alpha: f64) {
        if let Some(element) = &self.element {
            let style = element.style();
            let _ = style.set_property("display", "block");
            let _ = style.set_property(
                "background-image",
                &gradient_css(x, y, transition_radius, alpha),
            );
        }
    }

    pub fn hide(&self) {
        if let Some(element) = &self.element {
            let _ = element.style().set_property("display", "none");
        }
    }

    /// Remove the injected node from the document.
    pub fn remove(&mut self) {
        if let Some(element) = self.element.take() {
            element.remove();
        }
    }
}

// =============================================================================
// FocusIndicator
// =============================================================================

/// Small translucent ring following the sample point.
pub struct FocusIndicator {
    element: Option<HtmlElement>,
}

impl Default for FocusIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusIndicator {
    pub fn new() -> Self {
        Self { element: None }
    }

    pub fn ensure(&mut self, document: &Document) -> Result<(), JsValue> {
        if self.element.is_some() {
            return Ok(());
        }
        let element = create_fixed_element(document, INDICATOR_ID)?;
        element.style().set_css_text(
            "position: fixed; width: 14px; height: 14px; border-radius: 50%; \
             border: 2px solid rgba(255, 193, 7, 0.85); \
             background: rgba(255, 193, 7, 0.25); \
             transform: translate(-50%, -50%); pointer-events: none; \
             z-index: 2147483647; display: none;",
        );
        self.element = Some(element);
        Ok(())
    }

    pub fn position(&self, x: f64, y: f64) {
        if let Some(element) = &self.element {
            let style = element.style();
            let _ = style.set_property("display", "block");
            let _ = style.set_property("left", &format!("{:.1}px", x));
            let _ = style.set_property("top", &format!("{:.1}px", y));
        }
    }

    pub fn hide(&self) {
        if let Some(element) = &self.element {
            let _ = element.style().set_property("display", "none");
        }
    }

    pub fn remove(&mut self) {
        if let Some(element) = self.element.take() {
            element.remove();
        }
    }
}
