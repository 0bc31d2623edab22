use super::*;

fn open_store() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("add.db"), dir.path().join("rem.db")).unwrap();
    (dir, store)
}

#[test]
fn put_then_get_round_trips() {
    let (_dir, store) = open_store();
    store.put(b"page.title", b"hello").unwrap();
    assert_eq!(store.get(b"page.title").unwrap(), Some(b"hello".to_vec()));
}

#[test]
fn delete_then_put_again_restores_the_key() {
    // `put`/`delete` both stamp the current wall-clock second, so a direct
    // put-then-delete pair can land in the same second; since adds win
    // ties (lww.rs), that leaves the outcome of the masking moment itself
    // ambiguous through this facade alone — see `src/lww_test.rs`'s
    // `delete_masks_a_present_key` for that exact tie-sensitive case
    // driven with explicit, disjoint timestamps. What's deterministic
    // through `Store`'s wall-clock-only API regardless of second-boundary
    // timing is that a put trailing a delete always wins, since it is
    // causally last and adds win ties either way.
    let (_dir, store) = open_store();
    store.put(b"a", b"1").unwrap();
    store.delete(b"a", b"1").unwrap();
    store.put(b"a", b"2").unwrap();
    assert_eq!(store.get(b"a").unwrap(), Some(b"2".to_vec()));
}

#[test]
fn put_rejects_oversized_value() {
    let (_dir, store) = open_store();
    let value = vec![b'v'; 94];
    assert!(matches!(store.put(b"k", &value), Err(Error::ValueTooLong { len: 94 })));
}

#[test]
fn each_visits_every_present_pair() {
    // As above, `delete` must land in a wall-clock second strictly after
    // the matching `put`'s for the removal to actually mask it (adds win
    // ties); `get_all_excludes_removed_entries` in `src/lww_test.rs`
    // covers the same masking behavior deterministically with explicit
    // timestamps, so the sleep here only needs to clear one second
    // boundary for this end-to-end `Store` check.
    let (_dir, store) = open_store();
    store.put(b"a", b"1").unwrap();
    store.put(b"b", b"2").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(1100));
    store.delete(b"b", b"2").unwrap();

    let mut seen = Vec::new();
    store
        .each(|k, v| {
            seen.push((k.to_vec(), v.to_vec()));
            Ok(())
        })
        .unwrap();
    assert_eq!(seen, vec![(b"a".to_vec(), b"1".to_vec())]);
}

#[test]
fn merge_brings_over_the_other_stores_state() {
    let (_dir1, s1) = open_store();
    let (_dir2, s2) = open_store();
    s2.put(b"x", b"from-s2").unwrap();
    s1.merge(&s2).unwrap();
    assert_eq!(s1.get(b"x").unwrap(), Some(b"from-s2".to_vec()));
}
