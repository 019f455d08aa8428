//! Layered, copy-on-write state cache over a pluggable key/value store.
//!
//! A [`DataCache`] tracks pending `Added` / `Changed` / `Deleted` state for
//! every key it has touched in a `BTreeMap` overlay. Reads consult the
//! overlay first and fall through to the parent layer; `commit` applies the
//! overlay to the parent atomically and clears it. Nesting is expressed as
//! Rust borrows: a child cache holds `&mut dyn Layer` into its parent, so the
//! borrow checker statically rules out committing into a dropped parent —
//! there is no `InvalidSnapshot` error to construct in safe code.

use crate::storage::{IReadOnlyStore, IStore, IWriteStore, SeekDirection};
use std::collections::BTreeMap;
use std::ops::Bound;

/// Per-key delta tracked by a [`DataCache`] overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackState {
    Added(Vec<u8>),
    Changed(Vec<u8>),
    Deleted,
}

/// Minimal read/write surface a cache layer can sit on top of: either the
/// root backing store or another `DataCache`.
pub trait Layer {
    fn try_get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn contains(&self, key: &[u8]) -> bool {
        self.try_get(key).is_some()
    }

    /// Ordered entries whose key starts with `prefix` (empty prefix scans
    /// everything). Eagerly collected, matching the underlying `IStore`
    /// convention of returning owned iterators.
    fn find(&self, prefix: &[u8], direction: SeekDirection) -> Vec<(Vec<u8>, Vec<u8>)>;

    fn add(&mut self, key: Vec<u8>, value: Vec<u8>);
    fn update(&mut self, key: &[u8], value: Vec<u8>);
    fn delete(&mut self, key: &[u8]);
}

/// Adapts the root [`IStore`] to [`Layer`] so a `DataCache` can be opened
/// directly on top of the backing database.
pub struct RootLayer<'s> {
    store: &'s mut dyn IStore,
}

impl<'s> RootLayer<'s> {
    pub fn new(store: &'s mut dyn IStore) -> Self {
        Self { store }
    }
}

impl<'s> Layer for RootLayer<'s> {
    fn try_get(&self, key: &[u8]) -> Option<Vec<u8>> {
        IReadOnlyStore::try_get(self.store, &key.to_vec())
    }

    fn find(&self, prefix: &[u8], direction: SeekDirection) -> Vec<(Vec<u8>, Vec<u8>)> {
        let seed = if prefix.is_empty() { None } else { Some(prefix) };
        self.store.find(seed, direction).collect()
    }

    fn add(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.store.put(key, value);
    }

    fn update(&mut self, key: &[u8], value: Vec<u8>) {
        self.store.put(key.to_vec(), value);
    }

    fn delete(&mut self, key: &[u8]) {
        IWriteStore::delete(self.store, &key.to_vec());
    }
}

/// A copy-on-write overlay over a parent [`Layer`] (the backing store, or
/// another `DataCache`). See module docs.
pub struct DataCache<'p> {
    parent: &'p mut dyn Layer,
    overlay: BTreeMap<Vec<u8>, TrackState>,
}

fn prefix_upper_bound(prefix: &[u8]) -> Bound<Vec<u8>> {
    let mut upper = prefix.to_vec();
    for i in (0..upper.len()).rev() {
        if upper[i] != 0xff {
            upper[i] += 1;
            upper.truncate(i + 1);
            return Bound::Excluded(upper);
        }
    }
    Bound::Unbounded
}

impl<'p> DataCache<'p> {
    pub fn new(parent: &'p mut dyn Layer) -> Self {
        Self {
            parent,
            overlay: BTreeMap::new(),
        }
    }

    /// Opens a child snapshot on top of this cache. The child borrows `self`
    /// mutably, so it is impossible (at compile time) to mutate or commit
    /// this layer while the child is alive.
    pub fn create_snapshot(&mut self) -> DataCache<'_> {
        DataCache::new(self)
    }

    /// Reads the current value, inserting `default()` into the overlay as a
    /// tracked `Changed`/`Added` entry, and returns a mutable handle into it.
    pub fn get_and_change(&mut self, key: &[u8], default: impl FnOnce() -> Vec<u8>) -> &mut Vec<u8> {
        let needs_insert = !matches!(
            self.overlay.get(key),
            Some(TrackState::Added(_)) | Some(TrackState::Changed(_))
                );
        if needs_insert {
            let existing = self.parent.try_get(key);
            let state = match existing {
                Some(v) => TrackState::Changed(v),
                None => TrackState::Added(default()),
            };
            self.overlay.insert(key.to_vec(), state);
        }
        match self.overlay.get_mut(key).expect("just inserted or already present") {
            TrackState::Added(v) | TrackState::Changed(v) => v,
            TrackState::Deleted => unreachable!("get_and_change never leaves a Deleted entry"),
        }
    }

    /// Applies this layer's deltas to the parent and clears the overlay.
    /// Atomic from the parent's perspective: either every delta lands or
    /// (on a parent error) none of the remaining ones are attempted.
    pub fn commit(&mut self) {
        for (key, state) in std::mem::take(&mut self.overlay) {
            match state {
                TrackState::Deleted => self.parent.delete(&key),
                TrackState::Added(v) | TrackState::Changed(v) => {
                    if self.parent.try_get(&key).is_some() {
                        self.parent.update(&key, v);
                    } else {
                        self.parent.add(key, v);
                    }
                }
            }
        }
    }

    /// The deltas tracked by this layer alone (not merged with the parent).
    pub fn get_changed_items(&self) -> impl Iterator<Item = (&Vec<u8>, &TrackState)> {
        self.overlay.iter()
    }

    /// Discards this layer's pending deltas without touching the parent.
    pub fn reset(&mut self) {
        self.overlay.clear();
    }
}

impl<'p> Layer for DataCache<'p> {
    fn try_get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.overlay.get(key) {
            Some(TrackState::Added(v)) | Some(TrackState::Changed(v)) => Some(v.clone()),
            Some(TrackState::Deleted) => None,
            None => self.parent.try_get(key),
        }
    }

    fn find(&self, prefix: &[u8], direction: SeekDirection) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut merged: BTreeMap<Vec<u8>, Option<Vec<u8>>> = BTreeMap::new();
        for (k, v) in self.parent.find(prefix, direction) {
            merged.insert(k, Some(v));
        }
        let range = (Bound::Included(prefix.to_vec()), prefix_upper_bound(prefix));
        for (k, state) in self.overlay.range(range) {
            let value = match state {
                TrackState::Added(v) | TrackState::Changed(v) => Some(v.clone()),
                TrackState::Deleted => None,
            };
            merged.insert(k.clone(), value);
        }
        let mut items: Vec<(Vec<u8>, Vec<u8>)> =
            merged.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))).collect();
        if direction == SeekDirection::Backward {
            items.reverse();
        }
        items
    }

    fn add(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.overlay.insert(key, TrackState::Added(value));
    }

    fn update(&mut self, key: &[u8], value: Vec<u8>) {
        self.overlay.insert(key.to_vec(), TrackState::Changed(value));
    }

    fn delete(&mut self, key: &[u8]) {
        self.overlay.insert(key.to_vec(), TrackState::Deleted);
    }
}
