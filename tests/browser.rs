//! Browser-side tests for the DOM halves of the pipeline: engine lifecycle,
//! mutate-then-restore, and teardown. The pure logic (zones, contrast,
//! snapshots, segmentation) is covered natively in the unit suites; these
//! only exercise what needs a real document.
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use lexicore::{FocusConfig, FocusEngine, FocusRenderer, GazeSample};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn set_body(html: &str) {
    document().body().unwrap().set_inner_html(html);
}

/// Resolves after the next repaint. Callbacks registered before this one
/// (a submitted frame, say) have already run by then.
async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

fn center_of(selector: &str) -> (f64, f64) {
    let element = document().query_selector(selector).unwrap().unwrap();
    let rect = element.get_bounding_client_rect();
    (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0)
}

// =============================================================================
// Engine lifecycle
// =============================================================================

#[wasm_bindgen_test]
fn start_and_stop_are_idempotent() {
    set_body("<p>quick brown fox</p>");
    let mut engine = FocusEngine::new().unwrap();

    engine.start().unwrap();
    engine.start().unwrap();
    assert!(engine.is_active());
    assert!(document().get_element_by_id("lexi-periphery-overlay").is_some());
    assert!(document().get_element_by_id("lexi-focus-indicator").is_some());

    engine.stop();
    engine.stop();
    assert!(!engine.is_active());

    // A stopped engine restarts cleanly.
    engine.start().unwrap();
    assert!(engine.is_active());

    engine.destroy();
    assert!(!engine.is_active());
    assert!(document().get_element_by_id("lexi-periphery-overlay").is_none());
    assert!(document().get_element_by_id("lexi-focus-indicator").is_none());
}

// =============================================================================
// Mutate-then-restore
// =============================================================================

#[wasm_bindgen_test]
async fn stop_restores_mutated_styles_exactly() {
    set_body(
        "<p><span class=\"lexi-token\" id=\"tok\" \
         style=\"background-color: red; letter-spacing: 1px;\">focus</span></p>",
    );
    let renderer = FocusRenderer::new(document(), FocusConfig::default());
    renderer.start().unwrap();

    let (x, y) = center_of("#tok");
    renderer.submit(GazeSample::new(x, y, 0.0), 0.0);
    next_frame().await;

    let tok = document().get_element_by_id("tok").unwrap();
    let style = tok.dyn_ref::<web_sys::HtmlElement>().unwrap().style();
    assert_ne!(style.get_property_value("background-color").unwrap(), "red");
    assert!(tok.get_attribute("data-lexi-key").is_some());

    renderer.stop();
    assert_eq!(style.get_property_value("background-color").unwrap(), "red");
    assert_eq!(style.get_property_value("letter-spacing").unwrap(), "1px");
    // Properties that were unset come back unset, not zeroed.
    assert_eq!(style.get_property_value("box-shadow").unwrap(), "");
    assert_eq!(style.get_property_value("word-spacing").unwrap(), "");
    assert!(tok.get_attribute("data-lexi-key").is_none());

    renderer.destroy();
}

// =============================================================================
// Teardown
// =============================================================================

#[wasm_bindgen_test]
async fn destroy_unwraps_synthetic_spans() {
    set_body("<p id=\"content\">Reading support for everyone</p>");
    let renderer = FocusRenderer::new(document(), FocusConfig::default());
    renderer.start().unwrap();

    renderer.submit(GazeSample::new(1.0, 1.0, 0.0), 0.0);
    next_frame().await;

    let wrapped = document().query_selector_all(".lexi-word").unwrap();
    assert_eq!(wrapped.length(), 4);

    renderer.destroy();
    assert_eq!(document().query_selector_all(".lexi-word").unwrap().length(), 0);
    let content = document().get_element_by_id("content").unwrap();
    assert_eq!(
        content.text_content().unwrap(),
        "Reading support for everyone"
    );
    assert!(document().get_element_by_id("lexi-periphery-overlay").is_none());
    assert!(document().get_element_by_id("lexi-focus-indicator").is_none());
}

// =============================================================================
// Frame scheduling across stop/start cycles
// =============================================================================

#[wasm_bindgen_test]
async fn cancelled_frame_reschedules_cleanly() {
    set_body("<p>alpha beta</p>");
    let renderer = FocusRenderer::new(document(), FocusConfig::default());
    renderer.start().unwrap();

    // Cancel a pending frame before it fires, then schedule another.
    renderer.submit(GazeSample::new(5.0, 5.0, 0.0), 0.0);
    renderer.stop();
    renderer.start().unwrap();
    renderer.submit(GazeSample::new(5.0, 5.0, 16.0), 0.0);
    next_frame().await;

    let stats = renderer.debug_stats_json();
    assert!(stats.contains("\"frames\":1"), "stats = {}", stats);
    renderer.destroy();
}

// =============================================================================
// Non-HTML colorizer tokens
// =============================================================================

#[wasm_bindgen_test]
async fn svg_token_gets_no_key_residue() {
    set_body(
        "<svg width=\"120\" height=\"40\">\
         <text x=\"10\" y=\"25\" class=\"lexi-token\" id=\"chart-label\">chart</text>\
         </svg>",
    );
    let renderer = FocusRenderer::new(document(), FocusConfig::default());
    renderer.start().unwrap();

    let (x, y) = center_of("#chart-label");
    renderer.submit(GazeSample::new(x, y, 0.0), 0.0);
    next_frame().await;

    // SVG text has no inline style surface to mutate or restore, so it must
    // never be keyed.
    let label = document().get_element_by_id("chart-label").unwrap();
    assert!(label.get_attribute("data-lexi-key").is_none());

    renderer.stop();
    assert!(label.get_attribute("data-lexi-key").is_none());
    renderer.destroy();
}
