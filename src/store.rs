//! Storage abstraction for locked revisions.

use safe_bump::{Checkpoint, Idx};

use crate::revision::Revision;

/// Saved length of a revision arena.
pub type StoreCheckpoint<K, V> = Checkpoint<Revision<K, V>>;

/// Append-only storage of locked revisions.
///
/// Abstracts over [`Arena`](safe_bump::Arena) (single-thread) and
/// [`SharedArena`](safe_bump::SharedArena) (multi-thread) backends.
/// Stored revisions are only ever handed out as shared references, which is
/// what keeps a locked revision immutable.
pub trait RevisionStore<K, V> {
    /// Stores a locked revision, returning its index.
    fn alloc(&mut self, revision: Revision<K, V>) -> Idx<Revision<K, V>>;

    /// Returns a reference to the revision at `idx`.
    fn get(&self, idx: Idx<Revision<K, V>>) -> &Revision<K, V>;

    /// Saves the current length of the arena.
    fn checkpoint(&self) -> StoreCheckpoint<K, V>;

    /// Drops every revision stored after `cp`.
    fn rollback(&mut self, cp: StoreCheckpoint<K, V>);

    /// Number of revisions currently stored.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
