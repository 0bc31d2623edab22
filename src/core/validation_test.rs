use super::*;

#[test]
fn key_within_bound_is_ok() {
    assert!(validate_key(b"key-1").is_ok());
    assert!(validate_key(&[b'k'; 30]).is_ok());
}

#[test]
fn empty_key_is_too_long() {
    assert!(matches!(validate_key(b""), Err(Error::KeyTooLong { len: 0 })));
}

#[test]
fn key_over_bound_is_too_long() {
    let key = vec![b'k'; 31];
    assert!(matches!(validate_key(&key), Err(Error::KeyTooLong { len: 31 })));
}

#[test]
fn value_within_bound_is_ok() {
    assert!(validate_value(b"v").is_ok());
    assert!(validate_value(&[b'v'; 93]).is_ok());
}

#[test]
fn value_over_bound_is_too_long() {
    let value = vec![b'v'; 94];
    assert!(matches!(validate_value(&value), Err(Error::ValueTooLong { len: 94 })));
}
