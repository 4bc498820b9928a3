//! FocusRenderer: the per-frame algorithm.
//!
//! One frame: reposition indicator -> revalidate cache -> classify zones ->
//! restore elements that left the highlight sets -> apply contrast-aware
//! highlights -> repaint the periphery overlay. At most one frame is ever
//! scheduled; samples arriving faster than the repaint rate overwrite the
//! pending slot. Nothing in here may throw out to the host page: every
//! per-element style failure is caught, logged, and skipped.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement};

use crate::focus::{
    classify, eased_falloff, highlight_for, linear_falloff, FocusConfig, FocusIndicator, Highlight,
    Intensity, PeripheryOverlay, SnapshotStore, StyleSnapshot, Zone,
};
use crate::tracker::{FrameGate, GazeSample};
use crate::words::WordIndex;

/// Attribute carrying the renderer-assigned element key. Removed whenever the
/// element is restored.
pub const KEY_ATTR: &str = "data-lexi-key";

/// Per-frame counters, exposed through the engine's debug stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameStats {
    pub frames: u64,
    pub last_frame_us: u64,
    pub regions: usize,
    pub focus: usize,
    pub transition: usize,
    pub restored: usize,
}

struct RendererCore {
    document: Document,
    config: FocusConfig,
    index: WordIndex,
    snapshots: SnapshotStore<Element>,
    /// Keys highlighted by the previous frame.
    lit: HashSet<u32>,
    gate: FrameGate,
    raf_handle: Option<i32>,
    raf_closure: Option<Closure<dyn FnMut()>>,
    overlay: PeripheryOverlay,
    indicator: FocusIndicator,
    next_key: u32,
    active: bool,
    fixation_ms: f64,
    stats: FrameStats,
}

/// Handle to one renderer instance. Clones share the same core, so the
/// scheduling closure and the engine see a single state machine.
#[derive(Clone)]
pub struct FocusRenderer {
    core: Rc<RefCell<RendererCore>>,
}

impl FocusRenderer {
    pub fn new(document: Document, config: FocusConfig) -> Self {
        Self {
            core: Rc::new(RefCell::new(RendererCore {
                document,
                config,
                index: WordIndex::new(),
                snapshots: SnapshotStore::new(),
                lit: HashSet::new(),
                gate: FrameGate::new(),
                raf_handle: None,
                raf_closure: None,
                overlay: PeripheryOverlay::new(),
                indicator: FocusIndicator::new(),
                next_key: 0,
                active: false,
                fixation_ms: 0.0,
                stats: FrameStats::default(),
            })),
        }
    }

    /// idle -> active. Installs invalidation observers and injects the
    /// overlay and indicator elements. Idempotent.
    pub fn start(&self) -> Result<(), JsValue> {
        let mut core = self.core.borrow_mut();
        let core = &mut *core;
        if core.active {
            return Ok(());
        }
        core.index.attach(&core.document)?;
        core.overlay.ensure(&core.document)?;
        core.indicator.ensure(&core.document)?;
        core.active = true;
        Ok(())
    }

    /// active -> idle. Cancels any pending frame, restores every mutated
    /// element to its snapshot, and hides the injected visuals. Idempotent.
    pub fn stop(&self) {
        let mut core = self.core.borrow_mut();
        let core = &mut *core;
        if !core.active {
            return;
        }
        core.active = false;
        if let Some(handle) = core.raf_handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        core.gate.cancel();
        restore_all(core);
        core.overlay.hide();
        core.indicator.hide();
    }

    /// Full teardown: stop, remove injected nodes, unwrap synthetic word
    /// spans, detach observers.
    pub fn destroy(&self) {
        self.stop();
        let mut core = self.core.borrow_mut();
        let core = &mut *core;
        core.overlay.remove();
        core.indicator.remove();
        // Breaks the core -> closure -> core reference cycle.
        core.raf_closure = None;
        let document = core.document.clone();
        core.index.destroy(&document);
    }

    /// Feed one sample. While idle this is a no-op; while active it coalesces
    /// into the single pending frame slot.
    pub fn submit(&self, sample: GazeSample, fixation_ms: f64) {
        let mut core = self.core.borrow_mut();
        {
            let core = &mut *core;
            if !core.active {
                return;
            }
            core.fixation_ms = fixation_ms;
            if !core.gate.submit(sample) {
                return;
            }
        }
        drop(core);
        self.schedule_frame();
    }

    pub fn is_active(&self) -> bool {
        self.core.borrow().active
    }

    pub fn set_intensity(&self, intensity: Intensity) {
        self.core.borrow_mut().config.intensity = intensity;
    }

    pub fn set_config(&self, config: FocusConfig) {
        self.core.borrow_mut().config = config;
    }

    pub fn config(&self) -> FocusConfig {
        self.core.borrow().config.clone()
    }

    /// Mark the word cache stale; the next frame rebuilds it.
    pub fn invalidate_cache(&self) {
        self.core.borrow_mut().index.invalidate();
    }

    pub fn debug_stats_json(&self) -> String {
        let core = self.core.borrow();
        #[derive(Serialize)]
        struct DebugStats<'a> {
            active: bool,
            frame: &'a FrameStats,
            index: &'a crate::words::IndexStats,
        }
        serde_json::to_string(&DebugStats {
            active: core.active,
            frame: &core.stats,
            index: core.index.stats(),
        })
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Schedule the at-most-one pending animation frame callback. The
    /// callback closure is created on first use and reused for every frame
    /// thereafter, so cancelling a pending frame never strands a one-shot
    /// closure. `destroy` drops it.
    fn schedule_frame(&self) {
        let rc = self.core.clone();
        let mut core = self.core.borrow_mut();
        let core = &mut *core;
        let closure = core.raf_closure.get_or_insert_with(|| {
            Closure::wrap(Box::new(move || {
                let mut core = rc.borrow_mut();
                let core = &mut *core;
                core.raf_handle = None;
                if !core.active {
                    return;
                }
                if let Some(sample) = core.gate.take() {
                    run_frame(core, sample);
                }
            }) as Box<dyn FnMut()>)
        });

        match web_sys::window()
            .map(|window| window.request_animation_frame(closure.as_ref().unchecked_ref()))
        {
            Some(Ok(handle)) => core.raf_handle = Some(handle),
            _ => core.gate.cancel(),
        }
    }
}

// =============================================================================
// Per-frame algorithm
// =============================================================================

fn run_frame(core: &mut RendererCore, sample: GazeSample) {
    let started = instant::Instant::now();

    // 1. Indicator follows the sample point.
    core.indicator.position(sample.x, sample.y);

    // 2-3. Revalidate the cache, derive this frame's radii.
    let radii = core.config.radii_with_dwell(core.fixation_ms);
    let regions = core.index.regions(&core.document);

    // 4. Partition every region by Euclidean distance.
    let centers: Vec<(f64, f64)> = regions.iter().map(|r| r.center()).collect();
    let zone_set = classify(sample.x, sample.y, &centers, &radii);

    // Assign keys up front so the restore pass knows this frame's membership.
    let mut keys: Vec<Option<u32>> = Vec::with_capacity(regions.len());
    let mut new_lit: HashSet<u32> = HashSet::new();
    for (i, region) in regions.iter().enumerate() {
        if matches!(zone_set.zones[i], Zone::Periphery) {
            // Restore-margin hysteresis: a previously lit element just past
            // the transition radius holds its highlight until it crosses the
            // margin. At the default margin of 1.0 this is a no-op.
            if core.config.restore_margin > 1.0 {
                if let Some(key) = existing_key(&region.element) {
                    if core.lit.contains(&key) {
                        let (cx, cy) = centers[i];
                        let dist = ((cx - sample.x).powi(2) + (cy - sample.y).powi(2)).sqrt();
                        if dist <= radii.transition * core.config.restore_margin {
                            new_lit.insert(key);
                        }
                    }
                }
            }
            keys.push(None);
            continue;
        }
        if !region.element.is_connected() {
            keys.push(None);
            continue;
        }
        // No inline style surface (an SVG colorizer token, say) means the
        // element can be neither mutated nor restored; it must never carry
        // a key.
        if inline_style(&region.element).is_none() {
            keys.push(None);
            continue;
        }
        let key = ensure_key(&region.element, &mut core.next_key);
        if let Some(key) = key {
            new_lit.insert(key);
        }
        keys.push(key);
    }

    // 5. Restore everything lit last frame that left the highlight sets.
    let mut restored = 0usize;
    let leaving: Vec<u32> = core.lit.difference(&new_lit).copied().collect();
    for key in leaving {
        if restore_key(&mut core.snapshots, key) {
            restored += 1;
        }
    }

    // 6-8. Apply highlights.
    for (i, region) in regions.iter().enumerate() {
        let key = match keys[i] {
            Some(key) => key,
            None => continue,
        };
        let (alpha_scale, spacing_scale) = match zone_set.zones[i] {
            Zone::Focus => (1.0, 1.0),
            Zone::Transition { fraction } => (linear_falloff(fraction), eased_falloff(fraction)),
            Zone::Periphery => continue,
        };

        let style = match inline_style(&region.element) {
            Some(style) => style,
            None => continue,
        };

        if !core.snapshots.contains(key) {
            core.snapshots
                .record(key, region.element.clone(), read_snapshot(&style));
        }

        let highlight = highlight_for(region.text_color.as_ref());
        let is_primary = zone_set.primary == Some(i);
        let original_box_shadow = core
            .snapshots
            .get(key)
            .map(|(_, snapshot)| snapshot.box_shadow.clone())
            .unwrap_or_default();

        if let Err(err) = apply_highlight(
            &style,
            &core.config,
            &highlight,
            alpha_scale,
            spacing_scale,
            is_primary,
            &original_box_shadow,
        ) {
            web_sys::console::error_1(
                &format!("[FocusRenderer] style mutation failed: {:?}", err).into(),
            );
        }
    }

    // 9. Periphery dimming overlay.
    core.overlay
        .paint(sample.x, sample.y, radii.transition, core.config.overlay_alpha());

    core.lit = new_lit;
    core.stats.frames += 1;
    core.stats.last_frame_us = started.elapsed().as_micros() as u64;
    core.stats.regions = zone_set.zones.len();
    core.stats.focus = zone_set.focus_count();
    core.stats.transition = zone_set.transition_count();
    core.stats.restored = restored;
}

/// Apply the highlight background, spacing boosts, and (for the primary
/// element) the underline accent. Any single failed property write aborts
/// only this element.
fn apply_highlight(
    style: &CssStyleDeclaration,
    config: &FocusConfig,
    highlight: &Highlight,
    alpha_scale: f64,
    spacing_scale: f64,
    is_primary: bool,
    original_box_shadow: &str,
) -> Result<(), JsValue> {
    let alpha = if is_primary {
        highlight.strong_alpha
    } else {
        highlight.normal_alpha * alpha_scale
    };
    style.set_property("background-color", &highlight.color.css_rgba(alpha))?;
    style.set_property(
        "letter-spacing",
        &format!("{:.3}em", config.letter_spacing_em() * spacing_scale),
    )?;
    style.set_property(
        "word-spacing",
        &format!("{:.3}em", config.word_spacing_em() * spacing_scale),
    )?;

    if is_primary {
        // Underline-equivalent accent under the single closest word.
        style.set_property(
            "box-shadow",
            &format!("0 2px 0 0 {}", highlight.color.css_rgba(highlight.strong_alpha)),
        )?;
    } else if original_box_shadow.is_empty() {
        style.remove_property("box-shadow")?;
    } else {
        style.set_property("box-shadow", original_box_shadow)?;
    }
    Ok(())
}

/// Restore one element from its snapshot and drop the bookkeeping for it.
fn restore_key(snapshots: &mut SnapshotStore<Element>, key: u32) -> bool {
    let (element, snapshot) = match snapshots.take(key) {
        Some(entry) => entry,
        None => return false,
    };
    restore_element(&element, &snapshot);
    true
}

fn restore_element(element: &Element, snapshot: &StyleSnapshot) {
    if let Some(style) = inline_style(element) {
        for (property, value) in snapshot.entries() {
            let result = if value.is_empty() {
                style.remove_property(property).map(|_| ())
            } else {
                style.set_property(property, value)
            };
            if let Err(err) = result {
                web_sys::console::error_1(
                    &format!("[FocusRenderer] restore of {} failed: {:?}", property, err).into(),
                );
            }
        }
    }
    let _ = element.remove_attribute(KEY_ATTR);
}

/// Restore every mutated element. Used by stop() and teardown.
fn restore_all(core: &mut RendererCore) {
    for (_, element, snapshot) in core.snapshots.drain() {
        restore_element(&element, &snapshot);
    }
    core.lit.clear();
}

fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
    Some(element.dyn_ref::<HtmlElement>()?.style())
}

fn read_snapshot(style: &CssStyleDeclaration) -> StyleSnapshot {
    let read = |property: &str| style.get_property_value(property).unwrap_or_default();
    StyleSnapshot {
        background_color: read("background-color"),
        box_shadow: read("box-shadow"),
        letter_spacing: read("letter-spacing"),
        word_spacing: read("word-spacing"),
        opacity: read("opacity"),
    }
}

/// The element's renderer key, if one was ever assigned.
fn existing_key(element: &Element) -> Option<u32> {
    element.get_attribute(KEY_ATTR)?.parse::<u32>().ok()
}

/// Read the element's renderer key, assigning the next one on first touch.
fn ensure_key(element: &Element, next_key: &mut u32) -> Option<u32> {
    if let Some(key) = existing_key(element) {
        return Some(key);
    }
    let key = *next_key;
    *next_key += 1;
    element.set_attribute(KEY_ATTR, &key.to_string()).ok()?;
    Some(key)
}
