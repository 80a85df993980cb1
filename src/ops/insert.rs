//! Insertion operation: writes a value into the open head revision.

use std::hash::Hash;

use crate::ops::get::lookup_below;
use crate::revision::{Revision, Slot};
use crate::store::RevisionStore;

/// Stores `value` for `key` in the open `head`.
///
/// Returns the previously visible value. The head's size grows by one when
/// the key was not visible before (absent, or hidden by a tombstone).
pub fn insert<K, V, S>(store: &S, head: &mut Revision<K, V>, key: K, value: V) -> Option<V>
where
    K: Hash + Eq,
    V: Clone,
    S: RevisionStore<K, V>,
{
    debug_assert!(!head.locked, "insert into locked revision");

    // A key already in the head overlay shadows everything below it, so
    // the replaced slot is the visible one.
    let shadowed = if head.store.contains_key(&key) {
        None
    } else {
        lookup_below(store, head, &key).cloned()
    };

    let old = match head.store.insert(key, Slot::Value(value)) {
        Some(slot) => slot.into_value(),
        None => shadowed,
    };
    if old.is_none() {
        head.size += 1;
    }
    old
}
