//! Multi-threaded versioned map.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::ops;

use crate::ShadowCheckpoint;
use crate::arena_sync::RevisionArenaSync;
use crate::chain::RevisionChain;
use crate::error::Error;
use crate::iter::{Iter, Keys, Values};
use crate::revision::RevisionInfo;

/// Transactional versioned map, multi-threaded.
///
/// Identical API to [`ShadowMap`](crate::ShadowMap) but backed by
/// [`SharedArena`](safe_bump::SharedArena) for `Send + Sync` support: any
/// number of threads may read a shared `&ShadowMapSync` at once.
pub struct ShadowMapSync<K, V> {
    chain: RevisionChain<K, V, RevisionArenaSync<K, V>>,
}

// ---------------------------------------------------------------------------
// Construction, accessors & transactions (no K/V bounds)
// ---------------------------------------------------------------------------

impl<K, V> ShadowMapSync<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: RevisionChain::new(),
        }
    }

    /// Returns the number of visible key-value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns `true` if the map has no visible entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` while uncommitted changes may exist.
    #[must_use]
    pub const fn in_transaction(&self) -> bool {
        self.chain.is_open()
    }

    /// Makes all changes since the last commit permanent.
    pub fn commit(&mut self) {
        self.chain.commit(None);
    }

    /// Commits with a label.
    pub fn commit_tagged(&mut self, tag: impl Into<String>) {
        self.chain.commit(Some(tag.into()));
    }

    /// Discards all changes since the last commit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NothingToRollback`] if no transaction is open.
    pub fn rollback(&mut self) -> Result<(), Error> {
        self.chain.rollback()
    }

    /// Saves the last committed state.
    #[must_use]
    pub fn checkpoint(&self) -> ShadowCheckpoint<K, V> {
        self.chain.checkpoint()
    }

    /// Restores a previously saved checkpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleCheckpoint`] if the checkpoint's revision has
    /// already been discarded.
    pub fn rollback_to(&mut self, cp: ShadowCheckpoint<K, V>) -> Result<(), Error> {
        self.chain.rollback_to(cp)
    }

    /// Describes each revision a lookup may consult, newest first.
    #[must_use]
    pub fn history(&self) -> Vec<RevisionInfo> {
        self.chain.history()
    }

    /// Returns the number of committed revisions held in memory.
    #[must_use]
    pub fn revision_count(&self) -> usize {
        self.chain.revision_count()
    }
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V> ShadowMapSync<K, V> {
    /// Returns a reference to the value visible for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.chain.get(key)
    }

    /// Returns `true` if `key` has a visible value.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.chain.contains_key(key)
    }

    /// Returns `true` if some visible key maps to `value`.
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.chain.contains_value(value)
    }

    /// Returns an iterator over the visible `(&K, &V)` pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.chain.iter()
    }

    /// Returns an iterator over the visible keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the visible values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Collects the visible keys.
    ///
    /// The set borrows the map, so it cannot outlive the next write. Clone
    /// the keys out of it to keep them across writes.
    #[must_use]
    pub fn key_set(&self) -> HashSet<&K> {
        self.keys().collect()
    }

    /// Collects the visible entries.
    ///
    /// Like [`key_set`](Self::key_set), the view borrows the map; clone the
    /// entries to keep them across writes.
    #[must_use]
    pub fn entry_set(&self) -> HashMap<&K, &V> {
        self.iter().collect()
    }

    /// Calls `action` once for every visible entry.
    pub fn for_each<F: FnMut(&K, &V)>(&self, mut action: F) {
        for (k, v) in self.iter() {
            action(k, v);
        }
    }
}

// ---------------------------------------------------------------------------
// Write operations
// ---------------------------------------------------------------------------

impl<K: Hash + Eq + Clone, V: Clone> ShadowMapSync<K, V> {
    /// Inserts a key-value pair, returning the previously visible value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.chain.insert(key, value)
    }

    /// Removes `key`, returning the value that was visible.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.chain.remove(key)
    }

    /// Inserts every pair in order.
    pub fn put_all<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        self.extend(entries);
    }

    /// Hides every entry and starts a canonical revision.
    pub fn clear(&mut self) {
        self.chain.clear();
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V> Default for ShadowMapSync<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ShadowMapSync<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowMapSync")
            .field("len", &self.len())
            .field("in_transaction", &self.in_transaction())
            .field("revisions", &self.revision_count())
            .finish_non_exhaustive()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for ShadowMapSync<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for ShadowMapSync<K, V> {}

impl<K: Hash + Eq + Clone, V: Clone> Extend<(K, V)> for ShadowMapSync<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for ShadowMapSync<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V> ops::Index<&K> for ShadowMapSync<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a ShadowMapSync<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
