//! Layout invalidation signals: scroll, resize, and body-subtree mutation.
//!
//! The observer only flips a shared staleness flag; the actual rebuild is
//! deferred to the next cache read so a burst of invalidations costs one
//! rebuild, not many.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, MutationObserver, MutationObserverInit};

pub struct InvalidationObserver {
    stale: Rc<Cell<bool>>,
    scroll_closure: Option<Closure<dyn FnMut(Event)>>,
    resize_closure: Option<Closure<dyn FnMut(Event)>>,
    mutation_observer: Option<MutationObserver>,
    mutation_closure: Option<Closure<dyn FnMut(js_sys::Array, MutationObserver)>>,
}

impl Default for InvalidationObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl InvalidationObserver {
    pub fn new() -> Self {
        Self {
            stale: Rc::new(Cell::new(false)),
            scroll_closure: None,
            resize_closure: None,
            mutation_observer: None,
            mutation_closure: None,
        }
    }

    /// Install scroll/resize listeners on `window` and a mutation observer on
    /// the document body. No-op while already attached.
    pub fn attach(&mut self, document: &Document) -> Result<(), JsValue> {
        if self.mutation_observer.is_some() {
            return Ok(());
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;

        let stale = self.stale.clone();
        let scroll = Closure::wrap(Box::new(move |_: Event| {
            stale.set(true);
        }) as Box<dyn FnMut(Event)>);
        // Capture phase: scroll events on inner containers do not bubble.
        window.add_event_listener_with_callback_and_bool(
            "scroll",
            scroll.as_ref().unchecked_ref(),
            true,
        )?;

        let stale = self.stale.clone();
        let resize = Closure::wrap(Box::new(move |_: Event| {
            stale.set(true);
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

        let stale = self.stale.clone();
        let mutation = Closure::wrap(Box::new(move |_: js_sys::Array, _: MutationObserver| {
            stale.set(true);
        })
            as Box<dyn FnMut(js_sys::Array, MutationObserver)>);
        let observer = MutationObserver::new(mutation.as_ref().unchecked_ref())?;

        // Style-attribute writes by the renderer are deliberately not
        // observed; only size-affecting structural and text changes count.
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        init.set_character_data(true);
        observer.observe_with_options(&body, &init)?;

        self.scroll_closure = Some(scroll);
        self.resize_closure = Some(resize);
        self.mutation_observer = Some(observer);
        self.mutation_closure = Some(mutation);
        Ok(())
    }

    /// Remove all listeners and disconnect the mutation observer.
    pub fn detach(&mut self) {
        if let Some(window) = web_sys::window() {
            if let Some(closure) = self.scroll_closure.take() {
                let _ = window.remove_event_listener_with_callback_and_bool(
                    "scroll",
                    closure.as_ref().unchecked_ref(),
                    true,
                );
            }
            if let Some(closure) = self.resize_closure.take() {
                let _ = window
                    .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            }
        }
        if let Some(observer) = self.mutation_observer.take() {
            observer.disconnect();
        }
        self.mutation_closure = None;
    }

    /// Discard mutation records queued by the index's own wrap/unwrap pass so
    /// a rebuild does not immediately re-stale the cache it just built.
    pub fn flush_self_mutations(&self) {
        if let Some(observer) = &self.mutation_observer {
            let _ = observer.take_records();
        }
    }

    pub fn stale_flag(&self) -> Rc<Cell<bool>> {
        self.stale.clone()
    }

    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    pub fn mark_stale(&self) {
        self.stale.set(true);
    }

    pub fn clear_stale(&self) {
        self.stale.set(false);
    }
}

impl Drop for InvalidationObserver {
    fn drop(&mut self) {
        self.detach();
    }
}
