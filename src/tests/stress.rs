use crate::ShadowMap;

/// 1000 entries over many commits: insert all, verify all, remove all.
#[test]
fn thousand_entries() {
    let mut map = ShadowMap::new();
    for i in 0_u64..1000 {
        map.insert(i, i * 3);
        if i % 50 == 49 {
            map.commit();
        }
    }
    assert_eq!(map.len(), 1000);

    for i in 0_u64..1000 {
        assert_eq!(map.get(&i), Some(&(i * 3)), "missing key {i}");
    }

    for i in 0_u64..1000 {
        assert!(map.remove(&i).is_some(), "failed to remove key {i}");
    }
    assert!(map.is_empty());
    map.commit();
    assert!(map.is_empty());
    assert_eq!(map.iter().len(), 0);
}

/// One revision per write: lookups must walk the whole chain.
#[test]
fn deep_chain() {
    let mut map = ShadowMap::new();
    for i in 0_u64..500 {
        map.insert(i, i);
        map.commit();
    }
    assert_eq!(map.history().len(), 501);
    for i in 0_u64..500 {
        assert_eq!(map.get(&i), Some(&i));
    }
}

/// Insert + overwrite + remove interleaved with commits and rollbacks.
#[test]
fn interleaved_operations() {
    let mut map = ShadowMap::new();
    for i in 0_u64..200 {
        map.insert(i, i);
    }
    map.commit();
    // Overwrite even keys.
    for i in (0_u64..200).step_by(2) {
        map.insert(i, i + 1000);
    }
    map.commit();
    // Remove odd keys.
    for i in (1_u64..200).step_by(2) {
        assert!(map.remove(&i).is_some());
    }
    map.commit();
    // Discarded transaction.
    for i in 0_u64..200 {
        map.insert(i, 0);
    }
    map.rollback().unwrap();

    assert_eq!(map.len(), 100);
    for i in (0_u64..200).step_by(2) {
        assert_eq!(map.get(&i), Some(&(i + 1000)));
    }
}

/// Delete/insert churn under periodic clears keeps memory bounded.
#[test]
fn churn_with_clears() {
    let mut map = ShadowMap::new();
    for round in 0_u64..20 {
        map.clear();
        for i in 0_u64..50 {
            map.insert(i, round);
        }
        map.commit();
        for i in 0_u64..25 {
            map.remove(&i);
        }
        map.commit();
        assert_eq!(map.len(), 25);
        assert_eq!(map.revision_count(), 2);
    }
    assert_eq!(map.get(&30), Some(&19));
}
