//! Transactional versioned hash map.
//!
//! A [`ShadowMap`] keeps a chain of revisions, newest first. Callers mutate
//! the current revision, then either [`commit`](ShadowMap::commit) the
//! changes or [`rollback`](ShadowMap::rollback) to the last commit.
//!
//! # Key properties
//!
//! - **Copy-on-write**: the first write after a commit forks a new revision;
//!   committed revisions are never modified
//! - **Tombstones**: a removal shadows values stored in older revisions
//! - **Canonical boundary**: [`clear`](ShadowMap::clear) starts a
//!   self-sufficient revision; lookups stop there, and committing it
//!   compacts its tombstones and releases everything behind it
//! - **O(1) size**: every revision carries the visible size of the chain
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Example
//!
//! ```
//! use shadow_map::{Error, ShadowMap};
//!
//! let mut map = ShadowMap::new();
//! map.insert("k", 1);
//! map.commit();
//!
//! map.remove(&"k");
//! assert!(!map.contains_key(&"k"));
//!
//! map.rollback().unwrap();
//! assert_eq!(map.get(&"k"), Some(&1));
//! assert_eq!(map.rollback(), Err(Error::NothingToRollback));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

use std::fmt;

use safe_bump::Idx;

pub mod error;
pub mod iter;

mod arena;
mod arena_sync;
mod chain;
mod map;
mod map_sync;
mod ops;
mod revision;
mod store;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use map::ShadowMap;
pub use map_sync::ShadowMapSync;
pub use revision::RevisionInfo;

/// Saved committed state for [`rollback_to`](ShadowMap::rollback_to).
///
/// Created by [`ShadowMap::checkpoint`] or [`ShadowMapSync::checkpoint`].
/// Only valid for the map that created it.
pub struct ShadowCheckpoint<K, V> {
    pub(crate) store: store::StoreCheckpoint<K, V>,
    pub(crate) tip: Idx<revision::Revision<K, V>>,
    pub(crate) tip_id: u64,
}

impl<K, V> ShadowCheckpoint<K, V> {
    /// Id of the committed revision this checkpoint restores.
    #[must_use]
    pub const fn revision_id(&self) -> u64 {
        self.tip_id
    }
}

// ShadowCheckpoint holds only indices and primitives, never K/V data.

impl<K, V> Clone for ShadowCheckpoint<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for ShadowCheckpoint<K, V> {}

impl<K, V> fmt::Debug for ShadowCheckpoint<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowCheckpoint")
            .field("revision", &self.tip_id)
            .finish_non_exhaustive()
    }
}
