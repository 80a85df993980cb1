//! Removal operations: tombstoning a key and clearing the head.

use std::hash::Hash;
use std::mem;

use crate::ops::get::lookup_below;
use crate::revision::{Revision, Slot};
use crate::store::RevisionStore;

/// Tombstones `key` in the open `head`.
///
/// The caller has already established that `key` is visible. Returns the
/// value that was visible, and shrinks the head's size by one.
pub fn remove<K, V, S>(store: &S, head: &mut Revision<K, V>, key: &K) -> Option<V>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: RevisionStore<K, V>,
{
    debug_assert!(!head.locked, "remove from locked revision");

    let old = if let Some(slot) = head.store.get_mut(key) {
        mem::replace(slot, Slot::Tombstone).into_value()
    } else {
        let old = lookup_below(store, head, key).cloned();
        head.store.insert(key.clone(), Slot::Tombstone);
        old
    };
    if old.is_some() {
        head.size -= 1;
    }
    old
}

/// Empties the open `head` and turns it into a compaction boundary.
pub fn clear<K, V>(head: &mut Revision<K, V>) {
    debug_assert!(!head.locked, "clear of locked revision");

    head.store.clear();
    head.canonical = true;
    head.size = 0;
}
