//! FocusEngine: the JS-facing facade wiring the position source, the gaze
//! tracker, and the focus renderer together.
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { FocusEngine } from 'lexicore';
//!
//! await init();
//!
//! const engine = new FocusEngine();
//! engine.onStatusChange((active) => badge.toggle(active));
//! engine.setIntensity('medium');
//! engine.start();                  // pointer-driven focus effect
//!
//! // Alternative upstream producer (webcam gaze estimator):
//! engine.pushSample(x, y, performance.now());
//!
//! engine.stop();                   // restores every touched element
//! engine.destroy();                // also unwraps synthetic word spans
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::focus::{FocusConfig, FocusRenderer, Intensity};
use crate::tracker::{GazeTracker, PointerSource};

/// One independent engine instance. All mutable state hangs off this handle;
/// multiple instances (e.g. in tests) do not interfere.
#[wasm_bindgen]
pub struct FocusEngine {
    renderer: FocusRenderer,
    source: PointerSource,
    tracker: Rc<RefCell<GazeTracker>>,
    status_callback: Option<js_sys::Function>,
    active: bool,
}

#[wasm_bindgen]
impl FocusEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<FocusEngine, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let config = FocusConfig::default();
        let smoothing = config.smoothing;
        Ok(FocusEngine {
            renderer: FocusRenderer::new(document, config),
            source: PointerSource::new(),
            tracker: Rc::new(RefCell::new(GazeTracker::new(smoothing))),
            status_callback: None,
            active: false,
        })
    }

    /// Begin tracking and painting. Idempotent.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.active {
            return Ok(());
        }
        self.renderer.start()?;

        let renderer = self.renderer.clone();
        let tracker = self.tracker.clone();
        self.source.start(move |x, y, timestamp_ms| {
            let (sample, fixation_ms) = tracker.borrow_mut().ingest(x, y, timestamp_ms);
            renderer.submit(sample, fixation_ms);
        })?;

        self.active = true;
        self.emit_status(true);
        Ok(())
    }

    /// Stop tracking, restore every mutated element, hide the visuals.
    /// Idempotent; safe to call while already stopped.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.source.stop();
        self.renderer.stop();
        self.tracker.borrow_mut().reset();
        self.active = false;
        self.emit_status(false);
    }

    /// Full teardown: stop, remove injected overlay/indicator nodes, and
    /// unwrap synthetic word spans back to plain text.
    pub fn destroy(&mut self) {
        self.stop();
        self.renderer.destroy();
    }

    /// Inject a sample from an alternative producer (e.g. webcam gaze
    /// estimation). Same pipeline as pointer input.
    #[wasm_bindgen(js_name = pushSample)]
    pub fn push_sample(&mut self, x: f64, y: f64, timestamp_ms: f64) {
        let (sample, fixation_ms) = self.tracker.borrow_mut().ingest(x, y, timestamp_ms);
        self.renderer.submit(sample, fixation_ms);
    }

    /// Set the crowding intensity: "low" | "medium" | "high".
    #[wasm_bindgen(js_name = setIntensity)]
    pub fn set_intensity(&mut self, level: &str) -> Result<(), JsValue> {
        let intensity = Intensity::parse(level).map_err(|e| JsValue::from_str(&e))?;
        self.renderer.set_intensity(intensity);
        Ok(())
    }

    /// Replace the whole configuration from a JS object
    /// (`{ intensity, adaptiveDwell, smoothing, restoreMargin }`).
    pub fn configure(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: FocusConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {}", e)))?;
        self.tracker.borrow_mut().set_smoothing(config.smoothing);
        self.renderer.set_config(config);
        Ok(())
    }

    /// Current configuration as a JS object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.renderer.config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Register the boolean active/tracking notification, fired on start and
    /// stop transitions. Display-only; nothing internal consumes it.
    #[wasm_bindgen(js_name = onStatusChange)]
    pub fn on_status_change(&mut self, callback: js_sys::Function) {
        self.status_callback = Some(callback);
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Duration of the current fixation in milliseconds, 0 when the gaze is
    /// moving. Display-only.
    #[wasm_bindgen(js_name = fixationDuration)]
    pub fn fixation_duration(&self) -> f64 {
        self.tracker.borrow().fixation_ms()
    }

    /// Force a word cache rebuild on the next frame.
    #[wasm_bindgen(js_name = invalidateCache)]
    pub fn invalidate_cache(&mut self) {
        self.renderer.invalidate_cache();
    }

    /// Frame/index counters as a JSON string, for debugging.
    #[wasm_bindgen(js_name = debugStats)]
    pub fn debug_stats(&self) -> String {
        self.renderer.debug_stats_json()
    }

    fn emit_status(&self, active: bool) {
        if let Some(callback) = &self.status_callback {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_bool(active)) {
                web_sys::console::error_1(
                    &format!("[FocusEngine] status callback failed: {:?}", err).into(),
                );
            }
        }
    }
}
