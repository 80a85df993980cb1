//! Compaction: strips tombstones from a canonical revision.

use crate::revision::Revision;

/// Removes every tombstone from a canonical revision.
///
/// Returns the number of tombstones dropped. A canonical revision is never
/// looked past, so its tombstones shadow nothing.
pub fn compact<K, V>(revision: &mut Revision<K, V>) -> usize {
    debug_assert!(revision.canonical, "compaction of non-canonical revision");

    let before = revision.store.len();
    revision.store.retain(|_, slot| !slot.is_tombstone());
    before - revision.store.len()
}
