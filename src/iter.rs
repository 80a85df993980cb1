//! Iterator types for versioned maps.

use std::collections::HashSet;
use std::hash::Hash;

use crate::ops::get::Revisions;
use crate::revision::Slot;
use crate::store::RevisionStore;

/// Iterator over references to the visible key-value pairs of a
/// [`ShadowMap`](crate::ShadowMap).
///
/// Entries are resolved when the iterator is created: each visible key
/// appears exactly once, with its newest value. No order is guaranteed.
pub struct Iter<'a, K, V> {
    entries: Vec<(&'a K, &'a V)>,
    pos: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Creates an iterator by resolving every revision up to the canonical
    /// boundary, newest first.
    pub(crate) fn new<S: RevisionStore<K, V>>(revisions: Revisions<'a, K, V, S>, len: usize) -> Self
    where
        K: Hash + Eq,
    {
        let mut entries = Vec::with_capacity(len);
        let mut seen: HashSet<&'a K> = HashSet::new();
        for revision in revisions {
            for (key, slot) in &revision.store {
                if !seen.insert(key) {
                    continue;
                }
                if let Slot::Value(value) = slot {
                    entries.push((key, value));
                }
            }
        }
        debug_assert_eq!(entries.len(), len, "visible entries disagree with size");
        Self { entries, pos: 0 }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos < self.entries.len() {
            let item = self.entries[self.pos];
            self.pos += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over the visible keys of a map.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over the visible values of a map.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
