//! Tests for placeholder key generation

use rowset::rowset::keys::{is_placeholder_key, placeholder_key, placeholder_name};

#[test]
fn test_placeholder_keys_are_strictly_negative() {
    for _ in 0..100 {
        let key = placeholder_key();
        assert!(key < 0, "placeholder key {} is not negative", key);
        assert!(is_placeholder_key(key));
    }
}

#[test]
fn test_assigned_keys_are_not_placeholders() {
    assert!(!is_placeholder_key(0));
    assert!(!is_placeholder_key(42));
    assert!(is_placeholder_key(-1));
}

#[test]
fn test_placeholder_name_shape() {
    let name = placeholder_name("tmp_", 8);
    assert!(name.starts_with("tmp_"));
    assert_eq!(name.len(), 12);
    assert!(name[4..].chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_placeholder_name_without_suffix() {
    assert_eq!(placeholder_name("fixed", 0), "fixed");
}

#[test]
fn test_placeholder_keys_vary() {
    // 32 draws from a 2^63 space colliding would point at a broken RNG
    let keys: std::collections::HashSet<i64> = (0..32).map(|_| placeholder_key()).collect();
    assert!(keys.len() > 1);
}
