use crate::focus::{SnapshotStore, StyleSnapshot};

fn snapshot(background: &str) -> StyleSnapshot {
    StyleSnapshot {
        background_color: background.to_string(),
        box_shadow: String::new(),
        letter_spacing: "0.1em".to_string(),
        word_spacing: String::new(),
        opacity: "0.75".to_string(),
    }
}

#[test]
fn first_recording_wins() {
    let mut store: SnapshotStore<&str> = SnapshotStore::new();
    store.record(1, "el", snapshot("red"));
    // A later frame re-mutating the same element must not overwrite the
    // original pre-mutation values.
    store.record(1, "el", snapshot("rgba(255, 249, 196, 0.35)"));

    let (_, snap) = store.take(1).unwrap();
    assert_eq!(snap.background_color, "red");
}

#[test]
fn take_removes_the_entry() {
    let mut store: SnapshotStore<&str> = SnapshotStore::new();
    store.record(7, "el", snapshot(""));
    assert!(store.contains(7));

    assert!(store.take(7).is_some());
    assert!(!store.contains(7));
    assert!(store.take(7).is_none());
}

#[test]
fn drain_empties_the_store() {
    let mut store: SnapshotStore<u8> = SnapshotStore::new();
    for key in 0..5 {
        store.record(key, key as u8, snapshot("blue"));
    }
    assert_eq!(store.len(), 5);

    let drained = store.drain();
    assert_eq!(drained.len(), 5);
    assert!(store.is_empty());

    let mut keys: Vec<u32> = drained.iter().map(|(k, _, _)| *k).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![0, 1, 2, 3, 4]);
}

#[test]
fn entries_expose_all_touched_properties() {
    let snap = snapshot("green");
    let entries = snap.entries();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0], ("background-color", "green"));
    // Empty values mean "property was unset, remove on restore".
    assert_eq!(entries[1], ("box-shadow", ""));
    assert_eq!(entries[4], ("opacity", "0.75"));
}

#[test]
fn snapshots_restore_to_byte_identical_values() {
    // Whatever sequence of re-recordings happens, the stored
    // snapshot stays byte-identical to the pre-first-mutation state.
    let original = snapshot("rgb(1, 2, 3)");
    let mut store: SnapshotStore<()> = SnapshotStore::new();
    store.record(3, (), original.clone());
    for _ in 0..10 {
        store.record(3, (), snapshot("mutated"));
    }
    let (_, restored) = store.take(3).unwrap();
    assert_eq!(restored, original);
}
