//! Shared-arena-backed revision storage (multi-threaded).

use safe_bump::{Idx, SharedArena};

use crate::revision::Revision;
use crate::store::{RevisionStore, StoreCheckpoint};

/// Thread-safe revision storage using a [`SharedArena`].
pub struct RevisionArenaSync<K, V> {
    revisions: SharedArena<Revision<K, V>>,
}

impl<K, V> RevisionArenaSync<K, V> {
    /// Creates an empty store.
    pub const fn new() -> Self {
        Self {
            revisions: SharedArena::new(),
        }
    }
}

impl<K, V> Default for RevisionArenaSync<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RevisionStore<K, V> for RevisionArenaSync<K, V> {
    fn alloc(&mut self, revision: Revision<K, V>) -> Idx<Revision<K, V>> {
        self.revisions.alloc(revision)
    }

    fn get(&self, idx: Idx<Revision<K, V>>) -> &Revision<K, V> {
        self.revisions.get(idx)
    }

    fn checkpoint(&self) -> StoreCheckpoint<K, V> {
        self.revisions.checkpoint()
    }

    fn rollback(&mut self, cp: StoreCheckpoint<K, V>) {
        self.revisions.rollback(cp);
    }

    fn len(&self) -> usize {
        self.revisions.len()
    }
}
