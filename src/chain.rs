//! Transaction engine shared by both map flavours.
//!
//! A chain is an optional open head revision on top of a committed tip.
//! Locked revisions live in a [`RevisionStore`]; the last stored revision is
//! always the tip. Writes fork a head on demand, `commit` locks it into the
//! store, `rollback` drops it.

use std::hash::Hash;

use safe_bump::Idx;
use tracing::{debug, trace};

use crate::ShadowCheckpoint;
use crate::error::Error;
use crate::iter::Iter;
use crate::ops::compact::compact;
use crate::ops::get::{Revisions, lookup};
use crate::ops::{insert, remove};
use crate::revision::{Revision, RevisionInfo, Slot};
use crate::store::{RevisionStore, StoreCheckpoint};

/// Revision chain with copy-on-write forking.
pub struct RevisionChain<K, V, S> {
    store: S,
    /// Checkpoint of the empty store, restored when a canonical revision is
    /// committed.
    base: StoreCheckpoint<K, V>,
    head: Option<Revision<K, V>>,
    tip: Idx<Revision<K, V>>,
}

// ---------------------------------------------------------------------------
// Construction & bookkeeping (no K/V bounds)
// ---------------------------------------------------------------------------

impl<K, V, S: RevisionStore<K, V> + Default> RevisionChain<K, V, S> {
    /// Creates a chain holding only the root revision.
    pub fn new() -> Self {
        let mut store = S::default();
        let base = store.checkpoint();
        let tip = store.alloc(Revision::root());
        Self {
            store,
            base,
            head: None,
            tip,
        }
    }
}

impl<K, V, S: RevisionStore<K, V>> RevisionChain<K, V, S> {
    /// Visible size of the newest revision.
    pub fn len(&self) -> usize {
        self.head
            .as_ref()
            .map_or_else(|| self.store.get(self.tip).size, |head| head.size)
    }

    /// Returns `true` while a transaction is open.
    pub const fn is_open(&self) -> bool {
        self.head.is_some()
    }

    /// Number of locked revisions retained by the store.
    pub fn revision_count(&self) -> usize {
        self.store.len()
    }

    /// Revisions a lookup may consult, newest first.
    pub fn revisions(&self) -> Revisions<'_, K, V, S> {
        Revisions::new(&self.store, self.head.as_ref(), self.tip)
    }

    /// Bookkeeping of every revision up to the canonical boundary.
    pub fn history(&self) -> Vec<RevisionInfo> {
        self.revisions().map(Revision::info).collect()
    }

    /// Records the committed tip.
    pub fn checkpoint(&self) -> ShadowCheckpoint<K, V> {
        ShadowCheckpoint {
            store: self.store.checkpoint(),
            tip: self.tip,
            tip_id: self.store.get(self.tip).id,
        }
    }

    /// Discards the open transaction.
    pub fn rollback(&mut self) -> Result<(), Error> {
        let head = self.head.take().ok_or(Error::NothingToRollback)?;
        debug!(
            revision = head.id,
            discarded = head.store.len(),
            "rolled back revision"
        );
        Ok(())
    }

    /// Discards the open transaction and every revision committed after `cp`.
    pub fn rollback_to(&mut self, cp: ShadowCheckpoint<K, V>) -> Result<(), Error> {
        let raw = cp.tip.into_raw();
        if raw >= self.store.len() || self.store.get(cp.tip).id != cp.tip_id {
            return Err(Error::StaleCheckpoint);
        }
        let discarded = self.store.len() - raw - 1;
        self.head = None;
        self.store.rollback(cp.store);
        self.tip = cp.tip;
        debug!(revision = cp.tip_id, discarded, "restored checkpoint");
        Ok(())
    }

    /// Locks the open head into the store.
    ///
    /// With a `tag`, an empty head is forked first so the label always lands
    /// on a new revision. Without one, committing with no open transaction
    /// does nothing.
    pub fn commit(&mut self, tag: Option<String>) {
        if tag.is_some() {
            Self::open_head(&self.store, &mut self.head, self.tip);
        }
        let Some(mut head) = self.head.take() else {
            return;
        };
        head.locked = true;
        if tag.is_some() {
            head.tag = tag;
        }
        let (id, len) = (head.id, head.size);

        if head.canonical {
            let dropped = compact(&mut head);
            trace!(revision = id, dropped, "compacted canonical revision");

            // Nothing behind a canonical revision is reachable any more.
            let reclaimed = self.store.len();
            self.store.rollback(self.base);
            head.previous = None;
            debug!(revision = id, reclaimed, "reclaimed superseded revisions");
        }

        self.tip = self.store.alloc(head);
        debug!(revision = id, len, tag = ?self.store.get(self.tip).tag, "committed revision");
    }

    /// Returns the open head, forking one on top of `tip` if needed.
    fn open_head<'a>(
        store: &S,
        head: &'a mut Option<Revision<K, V>>,
        tip: Idx<Revision<K, V>>,
    ) -> &'a mut Revision<K, V> {
        head.get_or_insert_with(|| {
            let revision = Revision::fork(tip, store.get(tip).size);
            trace!(
                revision = revision.id,
                previous = store.get(tip).id,
                "forked revision"
            );
            revision
        })
    }
}

// ---------------------------------------------------------------------------
// Reads (K: Hash + Eq)
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: RevisionStore<K, V>> RevisionChain<K, V, S> {
    /// Returns the visible value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        lookup(self.revisions(), key).and_then(Slot::value)
    }

    /// Returns `true` if `key` has a visible value.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if some visible key maps to `value`.
    ///
    /// A raw match in an older revision only counts if the key still
    /// resolves to `value`; later writes may have replaced or removed it.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.revisions().any(|revision| {
            revision
                .store
                .iter()
                .any(|(key, slot)| slot.value() == Some(value) && self.get(key) == Some(value))
        })
    }

    /// Resolves the visible entries.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.revisions(), self.len())
    }
}

// ---------------------------------------------------------------------------
// Writes (K: Hash + Eq + Clone, V: Clone)
// ---------------------------------------------------------------------------

impl<K: Hash + Eq + Clone, V: Clone, S: RevisionStore<K, V>> RevisionChain<K, V, S> {
    /// Writes `value` for `key`, returning the previously visible value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let head = Self::open_head(&self.store, &mut self.head, self.tip);
        insert::insert(&self.store, head, key, value)
    }

    /// Tombstones `key`, returning the value that was visible.
    ///
    /// Removing an absent key does not open a transaction.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }
        let head = Self::open_head(&self.store, &mut self.head, self.tip);
        remove::remove(&self.store, head, key)
    }

    /// Hides every key and makes the head a compaction boundary.
    pub fn clear(&mut self) {
        let head = Self::open_head(&self.store, &mut self.head, self.tip);
        remove::clear(head);
        trace!(revision = head.id, "cleared revision");
    }
}
