//! WordIndex: lazy, rebuild-wholesale cache of on-screen word regions.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, Text};

use crate::focus::contrast::ColorParser;
use crate::focus::overlay::{INDICATOR_ID, OVERLAY_ID};
use crate::words::{
    box_center, has_area, has_word, segment_runs, InvalidationObserver, TextRun, WordOrigin,
    WordRegion, COLOR_TOKEN_CLASS, WORD_CLASS,
};

/// NodeFilter.SHOW_TEXT
const SHOW_TEXT: u32 = 0x4;

/// Rebuild statistics, exposed through the engine's debug stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub rebuilds: u32,
    pub last_build_us: u64,
    pub regions: usize,
}

/// The rebuildable collection of highlightable word regions.
///
/// Discovery preference order: colorizer token spans, then spans from a
/// previous wrap pass, then a fresh synthetic wrap of the document body.
pub struct WordIndex {
    cache: Vec<WordRegion>,
    built: bool,
    wrapped: bool,
    observer: InvalidationObserver,
    color_parser: ColorParser,
    stats: IndexStats,
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl WordIndex {
    pub fn new() -> Self {
        Self {
            cache: Vec::new(),
            built: false,
            wrapped: false,
            observer: InvalidationObserver::new(),
            color_parser: ColorParser::new(),
            stats: IndexStats::default(),
        }
    }

    /// Install the invalidation observers. Idempotent.
    pub fn attach(&mut self, document: &Document) -> Result<(), JsValue> {
        self.observer.attach(document)
    }

    /// Current regions, rebuilding first when stale or never built.
    pub fn regions(&mut self, document: &Document) -> &[WordRegion] {
        if !self.built || self.observer.is_stale() {
            self.rebuild(document);
        }
        &self.cache
    }

    pub fn invalidate(&mut self) {
        self.observer.mark_stale();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Synchronous full rebuild of the cache.
    pub fn rebuild(&mut self, document: &Document) {
        let started = instant::Instant::now();
        self.cache.clear();

        let (elements, origin) = self.discover(document);
        for element in elements {
            let rect = element.get_bounding_client_rect();
            if !has_area(rect.width(), rect.height()) {
                continue;
            }
            let (cx, cy) = box_center(rect.left(), rect.top(), rect.width(), rect.height());
            let text_color = self.inline_color(&element);
            self.cache.push(WordRegion {
                element,
                cx,
                cy,
                origin,
                text_color,
            });
        }

        // The wrap pass mutates the body; drop the records it queued so the
        // fresh cache is not immediately re-marked stale.
        self.observer.flush_self_mutations();
        self.observer.clear_stale();
        self.built = true;
        self.stats.rebuilds += 1;
        self.stats.last_build_us = started.elapsed().as_micros() as u64;
        self.stats.regions = self.cache.len();
    }

    /// Unwrap every synthetically wrapped span back to plain text and merge
    /// adjacent text nodes. Colorizer token spans are not ours to remove.
    pub fn destroy(&mut self, document: &Document) {
        if self.wrapped {
            for element in query_all(document, &format!(".{}", WORD_CLASS)) {
                let text = element.text_content().unwrap_or_default();
                let replacement: Text = document.create_text_node(&text);
                if let Some(parent) = element.parent_node() {
                    if parent.replace_child(&replacement, &element).is_err() {
                        web_sys::console::error_1(
                            &"[WordIndex] failed to unwrap word span".into(),
                        );
                    }
                }
            }
            if let Some(body) = document.body() {
                body.normalize();
            }
            self.wrapped = false;
        }

        self.observer.flush_self_mutations();
        self.observer.detach();
        self.cache.clear();
        self.built = false;
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    fn discover(&mut self, document: &Document) -> (Vec<Element>, WordOrigin) {
        // 1. Colorizer tokens win: their per-token granularity is taken as-is.
        let colorized = query_all(document, &format!(".{}", COLOR_TOKEN_CLASS));
        if !colorized.is_empty() {
            return (colorized, WordOrigin::Colorized);
        }

        // 2. Reuse spans from a previous wrap pass.
        let existing = query_all(document, &format!(".{}", WORD_CLASS));
        if !existing.is_empty() {
            return (existing, WordOrigin::Wrapped);
        }

        // 3. Fresh synthetic wrap.
        if let Err(err) = self.wrap_body(document) {
            web_sys::console::error_1(
                &format!("[WordIndex] wrap pass failed: {:?}", err).into(),
            );
        }
        (
            query_all(document, &format!(".{}", WORD_CLASS)),
            WordOrigin::Wrapped,
        )
    }

    /// Walk all text nodes under body and wrap each non-whitespace run in a
    /// marker span, leaving whitespace runs as plain text.
    fn wrap_body(&mut self, document: &Document) -> Result<(), JsValue> {
        let body = match document.body() {
            Some(body) => body,
            None => return Ok(()),
        };

        let walker = document.create_tree_walker_with_what_to_show(&body, SHOW_TEXT)?;
        let mut targets: Vec<Node> = Vec::new();

        // Collect first: replacing nodes while the walker is live would skip
        // or revisit siblings.
        while let Some(node) = walker.next_node()? {
            if is_excluded(&node) {
                continue;
            }
            let text = node.text_content().unwrap_or_default();
            if has_word(&text) {
                targets.push(node);
            }
        }

        for node in targets {
            let text = node.text_content().unwrap_or_default();
            let parent = match node.parent_node() {
                Some(parent) => parent,
                None => continue,
            };

            let fragment = document.create_document_fragment();
            for run in segment_runs(&text) {
                match run {
                    TextRun::Word(word) => {
                        let span = document.create_element("span")?;
                        span.set_class_name(WORD_CLASS);
                        span.set_text_content(Some(&word));
                        fragment.append_child(&span)?;
                    }
                    TextRun::Gap(gap) => {
                        fragment.append_child(&document.create_text_node(&gap))?;
                    }
                }
            }
            parent.replace_child(&fragment, &node)?;
        }

        self.wrapped = true;
        Ok(())
    }

    /// Inline text color set on the element, if any. Read once per rebuild;
    /// the contrast rule consumes it every frame.
    fn inline_color(&self, element: &Element) -> Option<crate::focus::contrast::Rgb> {
        let style = element.dyn_ref::<HtmlElement>()?.style();
        let color = style.get_property_value("color").ok()?;
        self.color_parser.parse(&color)
    }
}

/// querySelectorAll, flattened to elements. An invalid selector yields an
/// empty result, never a thrown error.
fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(_) => return Vec::new(),
    };
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(element) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            out.push(element);
        }
    }
    out
}

/// Exclusion set for the wrap pass: non-text containers, the extension's own
/// injected UI, and anything already wrapped or colorized.
fn is_excluded(node: &Node) -> bool {
    let parent = match node.parent_element() {
        Some(parent) => parent,
        None => return true,
    };
    let selector = format!(
        "script,style,noscript,svg,canvas,textarea,.{},.{},#{},#{}",
        WORD_CLASS, COLOR_TOKEN_CLASS, OVERLAY_ID, INDICATOR_ID
    );
    matches!(parent.closest(&selector), Ok(Some(_)))
}
