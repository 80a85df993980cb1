//! Canonical revisions: `clear` checkpoints, compaction and reclaim.

use crate::ShadowMap;

#[test]
fn clear_hides_everything() {
    let mut map = ShadowMap::new();
    map.insert("K1", "V1");
    map.insert("K2", "V2");
    map.commit();
    map.insert("K3", "V3");
    map.remove(&"K2");

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.keys().count(), 0);
    for k in ["K1", "K2", "K3"] {
        assert!(!map.contains_key(&k));
    }

    map.insert("K1", "V1");
    assert_eq!(map.len(), 1);
    assert_eq!(map.keys().collect::<Vec<_>>(), vec![&"K1"]);
}

#[test]
fn clear_can_be_rolled_back() {
    let mut map = ShadowMap::new();
    map.put_all([("K1", 1), ("K2", 2), ("K3", 3)]);
    map.commit();
    map.clear();
    assert_eq!(map.len(), 0);
    map.rollback().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&"K2"), Some(&2));
}

/// Lookups stop at the nearest canonical revision.
#[test]
fn history_ends_at_canonical_revision() {
    let mut map = ShadowMap::new();
    for i in 0..5 {
        map.insert(i, i);
        map.commit();
    }
    // Five commits on top of the root.
    assert_eq!(map.history().len(), 6);

    map.clear();
    map.insert(100, 100);
    map.commit();
    map.insert(101, 101);
    map.commit();

    let history = map.history();
    assert_eq!(history.len(), 2);
    assert!(history.last().is_some_and(|r| r.canonical));
    assert!(history.iter().all(|r| r.locked));
    assert_eq!(map.get(&0), None);
    assert_eq!(map.len(), 2);
}

/// Committing a canonical revision drops its tombstones.
#[test]
fn commit_compacts_canonical_revision() {
    let mut map = ShadowMap::new();
    map.insert("old", 0);
    map.commit();

    map.clear();
    map.insert("a", 1);
    map.insert("b", 2);
    map.remove(&"a");
    let history = map.history();
    let head = &history[0];
    assert!(head.canonical);
    assert_eq!(head.tombstones, 1);

    map.commit();
    let history = map.history();
    let committed = &history[0];
    assert_eq!(committed.tombstones, 0);
    assert_eq!(committed.stored, 1);
    assert_eq!(map.get(&"a"), None);
    assert_eq!(map.get(&"b"), Some(&2));
    assert_eq!(map.get(&"old"), None);
}

/// Tombstones in a non-canonical revision are kept: they still shadow.
#[test]
fn regular_commit_keeps_tombstones() {
    let mut map = ShadowMap::new();
    map.insert("k", 1);
    map.commit();
    map.remove(&"k");
    map.commit();
    assert_eq!(map.history()[0].tombstones, 1);
    assert_eq!(map.get(&"k"), None);
}

/// Compaction does not change any visible result.
#[test]
fn compaction_is_transparent() {
    let mut map = ShadowMap::new();
    map.clear();
    for i in 0..50 {
        map.insert(i, i);
    }
    for i in (0..50).step_by(3) {
        map.remove(&i);
    }

    let mut before: Vec<(i32, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    let contains_before: Vec<bool> = (0..50).map(|i| map.contains_key(&i)).collect();
    let len_before = map.len();

    map.commit();

    let mut after: Vec<(i32, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    let contains_after: Vec<bool> = (0..50).map(|i| map.contains_key(&i)).collect();
    before.sort_unstable();
    after.sort_unstable();
    assert_eq!(before, after);
    assert_eq!(contains_before, contains_after);
    assert_eq!(len_before, map.len());
}

/// Committing a clear releases all revisions behind it.
#[test]
fn canonical_commit_reclaims_history() {
    super::init_tracing();
    let mut map = ShadowMap::new();
    for i in 0..20 {
        map.insert(i, i);
        map.commit();
    }
    assert_eq!(map.revision_count(), 21);

    map.clear();
    map.insert(7, 70);
    map.commit();
    assert_eq!(map.revision_count(), 1);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&7), Some(&70));

    map.insert(8, 80);
    map.commit();
    assert_eq!(map.revision_count(), 2);
    assert_eq!(map.len(), 2);
}

/// Clearing twice in one transaction keeps a single canonical revision.
#[test]
fn double_clear_in_transaction() {
    let mut map = ShadowMap::new();
    map.insert(1, 1);
    map.clear();
    map.insert(2, 2);
    map.clear();
    assert!(map.is_empty());
    map.commit();
    assert!(map.is_empty());
    assert_eq!(map.history().len(), 1);
}

#[test]
fn writes_after_clear_shadow_nothing_below() {
    let mut map = ShadowMap::new();
    map.insert("k", 1);
    map.commit();
    map.clear();
    assert_eq!(map.insert("k", 2), None, "cleared key is not visible");
    assert_eq!(map.remove(&"k"), Some(2));
    assert_eq!(map.remove(&"k"), None);
    map.commit();
    assert!(map.is_empty());
    assert_eq!(map.history()[0].stored, 0);
}
