use super::*;
use crate::btree::tree::Btree;

fn open_with(keys: &[&str]) -> (tempfile::TempDir, Btree) {
    let dir = tempfile::tempdir().unwrap();
    let tree = Btree::open(dir.path().join("store.db")).unwrap();
    for (i, key) in keys.iter().enumerate() {
        tree.insert(Pair::new(key.as_bytes().to_vec(), b"v".to_vec(), i as u32)).unwrap();
    }
    (dir, tree)
}

#[test]
fn empty_tree_yields_nothing() {
    let (_dir, tree) = open_with(&[]);
    assert_eq!(tree.iter().count(), 0);
}

#[test]
fn visits_every_key_exactly_once() {
    let keys: Vec<String> = (1..=120).map(|i| format!("key-{:04}", i)).collect();
    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let (_dir, tree) = open_with(&refs);

    let mut seen: Vec<Vec<u8>> = tree.iter().map(|r| r.unwrap().0).collect();
    seen.sort();
    let mut expected: Vec<Vec<u8>> = keys.iter().map(|k| k.as_bytes().to_vec()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn two_independent_iterators_can_be_live_at_once() {
    let keys: Vec<String> = (1..=40).map(|i| format!("key-{:04}", i)).collect();
    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let (_dir, tree) = open_with(&refs);

    let mut a = tree.iter();
    let mut b = tree.iter();
    assert!(a.next().is_some());
    assert!(b.next().is_some());
    assert!(a.next().is_some());
    let remaining_a = a.count();
    let remaining_b = b.count();
    assert_eq!(remaining_a, 37);
    assert_eq!(remaining_b, 38);
}
