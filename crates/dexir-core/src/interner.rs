//! Key → handle deduplication.
//!
//! The IR builder interns objects by the key that identifies them on disk
//! (a byte offset, an `(offset, debug_offset)` pair, or an element sequence)
//! and hands out the handle of the first object built for that key. Keys are
//! kept in insertion order so iteration is deterministic.

use std::hash::Hash;

use indexmap::IndexMap;

/// Deduplicating map from a key to the handle of the object built for it.
#[derive(Debug, Clone)]
pub struct Interner<K, H> {
    map: IndexMap<K, H>,
}

impl<K, H> Default for Interner<K, H> {
    fn default() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq, H: Copy> Interner<K, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle previously interned for `key`, if any.
    #[inline]
    pub fn get(&self, key: &K) -> Option<H> {
        self.map.get(key).copied()
    }

    /// Record `handle` for `key`. An existing entry wins and is returned.
    pub fn insert(&mut self, key: K, handle: H) -> H {
        *self.map.entry(key).or_insert(handle)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate `(key, handle)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, H)> {
        self.map.iter().map(|(k, h)| (k, *h))
    }
}
