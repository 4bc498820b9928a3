//! Pre-mutation style snapshots.
//!
//! Every style the renderer touches is recorded before the first mutation so
//! restoration is exact, never a blanket reset: colors the colorizer applied
//! independently must survive a restore untouched. The store owns the
//! element-keyed mapping; removal is paired with every restoration path.

use std::collections::HashMap;

/// The inline style properties the renderer mutates (plus opacity, recorded
/// so a restore is byte-exact even if a future variant fades elements).
pub const SNAPSHOT_PROPERTIES: [&str; 5] = [
    "background-color",
    "box-shadow",
    "letter-spacing",
    "word-spacing",
    "opacity",
];

/// Pre-mutation inline style values. Empty string means the property was
/// unset and must be removed on restore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    pub background_color: String,
    pub box_shadow: String,
    pub letter_spacing: String,
    pub word_spacing: String,
    pub opacity: String,
}

impl StyleSnapshot {
    /// (property, pre-mutation value) pairs in `SNAPSHOT_PROPERTIES` order.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("background-color", &self.background_color),
            ("box-shadow", &self.box_shadow),
            ("letter-spacing", &self.letter_spacing),
            ("word-spacing", &self.word_spacing),
            ("opacity", &self.opacity),
        ]
    }
}

/// Owned mapping from renderer-assigned element key to (element handle,
/// snapshot). Generic over the handle type so the bookkeeping is testable
/// without a DOM.
pub struct SnapshotStore<H> {
    map: HashMap<u32, (H, StyleSnapshot)>,
}

impl<H> Default for SnapshotStore<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> SnapshotStore<H> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Record a snapshot for `key`. The first recording wins: later frames
    /// re-mutate an already-mutated element, and the original values are the
    /// ones restoration needs.
    pub fn record(&mut self, key: u32, handle: H, snapshot: StyleSnapshot) {
        self.map.entry(key).or_insert((handle, snapshot));
    }

    pub fn contains(&self, key: u32) -> bool {
        self.map.contains_key(&key)
    }

    pub fn get(&self, key: u32) -> Option<&(H, StyleSnapshot)> {
        self.map.get(&key)
    }

    /// Remove and return the snapshot for `key`. Restoration paths call this
    /// so no snapshot outlives its element.
    pub fn take(&mut self, key: u32) -> Option<(H, StyleSnapshot)> {
        self.map.remove(&key)
    }

    /// Remove and return everything, for full teardown.
    pub fn drain(&mut self) -> Vec<(u32, H, StyleSnapshot)> {
        self.map
            .drain()
            .map(|(key, (handle, snapshot))| (key, handle, snapshot))
            .collect()
    }

    pub fn keys(&self) -> Vec<u32> {
        self.map.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
