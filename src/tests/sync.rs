use std::thread;

use crate::{Error, ShadowMapSync};

#[test]
fn sync_empty() {
    let map: ShadowMapSync<i32, i32> = ShadowMapSync::new();
    assert!(map.is_empty());
    assert_eq!(map.revision_count(), 1);
}

#[test]
fn sync_insert_and_get() {
    let mut map = ShadowMapSync::new();
    map.insert("key", 42);
    assert_eq!(map.get(&"key"), Some(&42));
    assert_eq!(map.len(), 1);
}

#[test]
fn sync_remove() {
    let mut map = ShadowMapSync::new();
    map.insert(1, 10);
    map.insert(2, 20);
    map.commit();
    assert_eq!(map.remove(&1), Some(10));
    assert_eq!(map.get(&1), None);
    assert_eq!(map.len(), 1);
}

#[test]
fn sync_commit_rollback() {
    let mut map = ShadowMapSync::new();
    map.insert(1, 10);
    map.commit();

    map.insert(2, 20);
    map.rollback().unwrap();
    assert_eq!(map.rollback(), Err(Error::NothingToRollback));

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1), Some(&10));
    assert_eq!(map.get(&2), None);
}

#[test]
fn sync_checkpoint_rollback() {
    let mut map = ShadowMapSync::new();
    map.insert(1, 10);
    map.commit();
    let cp = map.checkpoint();

    map.insert(2, 20);
    map.commit();
    map.rollback_to(cp).unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&2), None);
}

#[test]
fn sync_clear_reclaims() {
    let mut map = ShadowMapSync::new();
    for i in 0..10 {
        map.insert(i, i);
        map.commit();
    }
    map.clear();
    map.commit();
    assert_eq!(map.revision_count(), 1);
    assert!(map.is_empty());
}

#[test]
fn sync_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<ShadowMapSync<String, i32>>();
}

#[test]
fn sync_is_sync() {
    fn assert_sync<T: Sync>() {}
    assert_sync::<ShadowMapSync<String, i32>>();
}

/// Readers on several threads see the same point-in-time state.
#[test]
fn sync_concurrent_readers() {
    let mut map = ShadowMapSync::new();
    for i in 0_u64..100 {
        map.insert(i, i * 5);
        if i % 10 == 9 {
            map.commit();
        }
    }
    for i in (0_u64..100).step_by(2) {
        map.remove(&i);
    }

    let map = &map;
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(move || {
                assert_eq!(map.len(), 50);
                assert_eq!(map.iter().len(), 50);
                for i in 0_u64..100 {
                    let expected = (i % 2 == 1).then_some(i * 5);
                    assert_eq!(map.get(&i).copied(), expected);
                }
            });
        }
    });
}

#[test]
fn sync_stress_100() {
    let mut map = ShadowMapSync::new();
    for i in 0_u64..100 {
        map.insert(i, i * 5);
        map.commit();
    }
    assert_eq!(map.len(), 100);
    for i in 0_u64..100 {
        assert_eq!(map.get(&i), Some(&(i * 5)));
    }
}
