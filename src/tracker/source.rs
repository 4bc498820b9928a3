//! PointerSource: mousemove events as a uniform (x, y, timestamp) stream.
//!
//! No filtering or validation happens here; the source only adapts the raw
//! browser event into the callback shape the engine consumes, so an
//! alternative producer (webcam gaze estimation) can replace it without the
//! renderer noticing.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

/// Pointer-movement position source over `window`.
///
/// `start` and `stop` are idempotent; after `stop` no further callbacks are
/// invoked and the source can be restarted with a fresh callback.
pub struct PointerSource {
    closure: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl Default for PointerSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerSource {
    pub fn new() -> Self {
        Self { closure: None }
    }

    /// Attach the mousemove listener. No-op while already running.
    pub fn start<F>(&mut self, mut on_sample: F) -> Result<(), JsValue>
    where
        F: FnMut(f64, f64, f64) + 'static,
    {
        if self.closure.is_some() {
            return Ok(());
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            on_sample(
                event.client_x() as f64,
                event.client_y() as f64,
                event.time_stamp(),
            );
        }) as Box<dyn FnMut(MouseEvent)>);

        window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        self.closure = Some(closure);
        Ok(())
    }

    /// Detach the listener. Guarantees no further callback invocations.
    pub fn stop(&mut self) {
        if let Some(closure) = self.closure.take() {
            if let Some(window) = web_sys::window() {
                let _ = window
                    .remove_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.closure.is_some()
    }
}

impl Drop for PointerSource {
    fn drop(&mut self) {
        self.stop();
    }
}
