use super::*;

fn open() -> (tempfile::TempDir, LwwSet) {
    let dir = tempfile::tempdir().unwrap();
    let set = LwwSet::open(dir.path().join("add.db"), dir.path().join("rem.db")).unwrap();
    (dir, set)
}

#[test]
fn delete_masks_a_present_key() {
    let (_dir, set) = open();
    set.additions.add_at(b"a", b"1", 10).unwrap();
    assert!(set.exists(b"a").unwrap());
    set.removals.add_at(b"a", b"1", 20).unwrap();
    assert!(!set.exists(b"a").unwrap());
}

#[test]
fn remove_before_add_masks_then_a_later_add_restores() {
    let (_dir, set) = open();
    set.additions.add_at(b"a", b"1", 10).unwrap();
    set.removals.add_at(b"a", b"1", 5).unwrap();
    assert!(set.exists(b"a").unwrap());

    set.removals.add_at(b"a", b"1", 20).unwrap();
    assert!(!set.exists(b"a").unwrap());

    set.additions.add_at(b"a", b"2", 30).unwrap();
    assert!(set.exists(b"a").unwrap());
    assert_eq!(set.get(b"a").unwrap().unwrap(), b"2");
}

#[test]
fn merge_is_idempotent() {
    let (_dir1, s1) = open();
    let (_dir2, s2) = open();
    s1.additions.add_at(b"x", b"v1", 5).unwrap();
    s2.additions.add_at(b"x", b"v2", 7).unwrap();

    s1.merge(&s2).unwrap();
    assert_eq!(s1.get(b"x").unwrap().unwrap(), b"v2");

    s1.merge(&s2).unwrap();
    assert_eq!(s1.get(b"x").unwrap().unwrap(), b"v2");
}

#[test]
fn merge_is_commutative() {
    let (_dir1, s1) = open();
    let (_dir2, s2) = open();
    s1.additions.add_at(b"x", b"v1", 5).unwrap();
    s2.additions.add_at(b"x", b"v2", 7).unwrap();
    s1.removals.add_at(b"y", b"gone", 1).unwrap();
    s2.additions.add_at(b"y", b"here", 2).unwrap();

    let (_dira, a) = open();
    let (_dirb, b) = open();
    a.merge(&s1).unwrap();
    a.merge(&s2).unwrap();
    b.merge(&s2).unwrap();
    b.merge(&s1).unwrap();

    assert_eq!(a.get(b"x").unwrap(), b.get(b"x").unwrap());
    assert_eq!(a.exists(b"y").unwrap(), b.exists(b"y").unwrap());
}

#[test]
fn get_all_excludes_removed_entries() {
    let (_dir, set) = open();
    set.add(b"kept", b"1").unwrap();
    set.additions.add_at(b"gone", b"2", 1).unwrap();
    set.removals.add_at(b"gone", b"2", 2).unwrap();

    let mut seen = Vec::new();
    set.get_all(|k, v| {
        seen.push((k.to_vec(), v.to_vec()));
        Ok(())
    })
    .unwrap();

    assert_eq!(seen, vec![(b"kept".to_vec(), b"1".to_vec())]);
}
