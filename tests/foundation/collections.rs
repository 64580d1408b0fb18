//! Integration tests for the ordered name map
//!
//! Tests insertion order, in-place replacement, and structural sharing.

use tokenset_foundation::NameMap;

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn iteration_follows_insertion() {
    let map: NameMap<i32> = [("c", 3), ("a", 1), ("b", 2)].into_iter().collect();
    let keys: Vec<&str> = map.keys().map(AsRef::as_ref).collect();
    assert_eq!(keys, vec!["c", "a", "b"]);
}

#[test]
fn replacement_keeps_position() {
    let mut map: NameMap<&str> = [("foo", "Hello"), ("bar", "World")].into_iter().collect();
    assert_eq!(map.insert("foo", "Replaced"), Some("Hello"));
    assert_eq!(map.insert("baz", ""), None);

    let pairs: Vec<(&str, &str)> = map.iter().map(|(k, v)| (k.as_ref(), *v)).collect();
    assert_eq!(pairs, vec![("foo", "Replaced"), ("bar", "World"), ("baz", "")]);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn clones_are_independent() {
    let parent: NameMap<i32> = [("a", 1), ("b", 2)].into_iter().collect();
    let mut child = parent.clone();
    child.insert("a", 10);
    child.insert("c", 3);

    assert_eq!(parent.len(), 2);
    assert_eq!(parent.get("a"), Some(&1));
    assert_eq!(child.get("a"), Some(&10));
    assert_eq!(child.position("c"), Some(2));
    assert_ne!(parent, child);
}

#[test]
fn empty_map() {
    let map: NameMap<u8> = NameMap::default();
    assert!(map.is_empty());
    assert!(!map.contains_key("x"));
    assert_eq!(format!("{map:?}"), "{}");
}
