//! Arena-backed revision storage (single-threaded).

use safe_bump::{Arena, Idx};

use crate::revision::Revision;
use crate::store::{RevisionStore, StoreCheckpoint};

/// Revision storage using a single [`Arena`].
pub struct RevisionArena<K, V> {
    revisions: Arena<Revision<K, V>>,
}

impl<K, V> RevisionArena<K, V> {
    /// Creates an empty store.
    pub const fn new() -> Self {
        Self {
            revisions: Arena::new(),
        }
    }
}

impl<K, V> Default for RevisionArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RevisionStore<K, V> for RevisionArena<K, V> {
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
