//! Lookup operation: walks the revision chain toward the canonical boundary.

use std::hash::Hash;

use safe_bump::Idx;

use crate::revision::{Revision, Slot};
use crate::store::RevisionStore;

/// Iterator over the revisions a lookup may consult, newest first.
///
/// Starts at the head and follows `previous` links. The first canonical
/// revision is yielded and ends the walk; nothing behind it can hold
/// visible information.
pub struct Revisions<'a, K, V, S> {
    store: &'a S,
    pending: Option<&'a Revision<K, V>>,
}

impl<'a, K, V, S: RevisionStore<K, V>> Revisions<'a, K, V, S> {
    /// Walks from `head` if a transaction is open, otherwise from `tip`.
    pub fn new(store: &'a S, head: Option<&'a Revision<K, V>>, tip: Idx<Revision<K, V>>) -> Self {
        let start = head.unwrap_or_else(|| store.get(tip));
        Self {
            store,
            pending: Some(start),
        }
    }

    /// Walks the stored chain starting at `idx`.
    pub fn from_stored(store: &'a S, idx: Idx<Revision<K, V>>) -> Self {
        Self {
            store,
            pending: Some(store.get(idx)),
        }
    }
}

impl<'a, K, V, S: RevisionStore<K, V>> Iterator for Revisions<'a, K, V, S> {
    type Item = &'a Revision<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let revision = self.pending.take()?;
        if !revision.canonical {
            let store = self.store;
            self.pending = revision.previous.map(|idx| store.get(idx));
        }
        Some(revision)
    }
}

/// Returns the newest slot stored for `key`, which may be a tombstone.
///
/// `None` means no revision up to the canonical boundary wrote the key.
pub fn lookup<'a, K, V, S>(mut revisions: Revisions<'a, K, V, S>, key: &K) -> Option<&'a Slot<V>>
where
    K: Hash + Eq + 'a,
    V: 'a,
    S: RevisionStore<K, V>,
{
    revisions.find_map(|revision| revision.store.get(key))
}

/// Returns the visible value for `key` in the chain below an open head.
///
/// Used by writes once the head's own overlay has been checked.
pub fn lookup_below<'a, K, V, S>(store: &'a S, head: &Revision<K, V>, key: &K) -> Option<&'a V>
where
    K: Hash + Eq + 'a,
    V: 'a,
    S: RevisionStore<K, V>,
{
    if head.canonical {
        return None;
    }
    let previous = head.previous?;
    lookup(Revisions::from_stored(store, previous), key).and_then(Slot::value)
}
