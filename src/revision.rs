//! Revision layers and the tombstone slot.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use safe_bump::Idx;

/// Process-local revision id counter. Diagnostic only.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Local value stored for a key inside a single revision.
///
/// A [`Tombstone`](Self::Tombstone) records that the key was removed in this
/// revision and hides any value stored for the same key in older revisions.
#[derive(Clone, PartialEq, Eq)]
pub enum Slot<V> {
    /// A live value.
    Value(V),
    /// Deletion marker.
    Tombstone,
}

impl<V> Slot<V> {
    /// Returns the live value, or `None` for a tombstone.
    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        match self {
            Self::Value(v) => Some(v),
            Self::Tombstone => None,
        }
    }

    /// Consumes the slot, returning the live value if any.
    #[must_use]
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Value(v) => Some(v),
            Self::Tombstone => None,
        }
    }

    /// Returns `true` for a tombstone.
    #[must_use]
    pub const fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone)
    }
}

impl<V: fmt::Debug> fmt::Debug for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => fmt::Debug::fmt(v, f),
            Self::Tombstone => f.write_str("<tombstone>"),
        }
    }
}

/// One snapshot layer of a versioned map.
///
/// Holds the keys written since its predecessor, the visible size of the
/// whole chain as seen from this layer, and a link to the predecessor.
/// Once stored in a `RevisionStore` a revision is only reachable through
/// shared references.
pub struct Revision<K, V> {
    pub(crate) id: u64,
    pub(crate) tag: Option<String>,
    pub(crate) store: HashMap<K, Slot<V>>,
    pub(crate) size: usize,
    pub(crate) locked: bool,
    pub(crate) canonical: bool,
    pub(crate) previous: Option<Idx<Self>>,
}

impl<K, V> Revision<K, V> {
    /// Creates the root revision: empty, locked and canonical.
    #[must_use]
    pub(crate) fn root() -> Self {
        Self {
            id: next_id(),
            tag: None,
            store: HashMap::new(),
            size: 0,
            locked: true,
            canonical: true,
            previous: None,
        }
    }

    /// Creates an open revision on top of `previous`, inheriting its size.
    #[must_use]
    pub(crate) fn fork(previous: Idx<Self>, size: usize) -> Self {
        Self {
            id: next_id(),
            tag: None,
            store: HashMap::new(),
            size,
            locked: false,
            canonical: false,
            previous: Some(previous),
        }
    }

    /// Summarizes this revision.
    #[must_use]
    pub(crate) fn info(&self) -> RevisionInfo {
        let tombstones = self.store.values().filter(|s| s.is_tombstone()).count();
        RevisionInfo {
            id: self.id,
            tag: self.tag.clone(),
            len: self.size,
            stored: self.store.len(),
            tombstones,
            locked: self.locked,
            canonical: self.canonical,
        }
    }
}

impl<K, V> fmt::Debug for Revision<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Revision")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("len", &self.size)
            .field("stored", &self.store.len())
            .field("locked", &self.locked)
            .field("canonical", &self.canonical)
            .finish_non_exhaustive()
    }
}

/// Snapshot of a revision's bookkeeping, as returned by `history()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionInfo {
    /// Diagnostic id.
    pub id: u64,
    /// Label given by `commit_tagged`.
    pub tag: Option<String>,
    /// Visible keys in the chain as of this revision.
    pub len: usize,
    /// Keys written locally, tombstones included.
    pub stored: usize,
    /// Tombstones among the local keys.
    pub tombstones: usize,
    /// Whether the revision is locked.
    pub locked: bool,
    /// Whether the revision is a compaction boundary.
    pub canonical: bool,
}
