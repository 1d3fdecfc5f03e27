#![cfg(feature = "serde")]

//! Integration tests for serde support in ordtree.
//!
//! These tests verify that OrderedMap serializes as a map in ascending key
//! order and deserializes back into an equivalent map.

use ordtree::map::{OrderedIntMap, OrderedMap};
use rstest::rstest;

// =============================================================================
// Round Trip Tests
// =============================================================================

#[rstest]
fn test_ordered_map_json_roundtrip() {
    let mut map: OrderedMap<String, i32> = OrderedMap::new();
    for element_index in [50, 10, 90, 30, 70] {
        map.insert(format!("key{element_index:03}"), element_index);
    }
    let json = serde_json::to_string(&map).unwrap();
    let restored: OrderedMap<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(map, restored);
    assert_eq!(restored.check_invariants(), Ok(()));
}

#[rstest]
fn test_int_map_json_roundtrip() {
    let map: OrderedIntMap = [10, 5, 15, 2, 4, 12, 14]
        .into_iter()
        .map(|key| (key, key * 10))
        .collect();

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(
        json,
        r#"{"2":20,"4":40,"5":50,"10":100,"12":120,"14":140,"15":150}"#
    );

    let restored: OrderedIntMap = serde_json::from_str(&json).unwrap();
    assert_eq!(map, restored);
}

#[rstest]
fn test_ordered_map_with_vector_values() {
    let mut map = OrderedMap::new();
    map.insert("second".to_string(), vec![4, 5, 6]);
    map.insert("first".to_string(), vec![1, 2, 3]);

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"first":[1,2,3],"second":[4,5,6]}"#);

    let restored: OrderedMap<String, Vec<i32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(map, restored);
}

// =============================================================================
// Ordering Tests
// =============================================================================

#[rstest]
fn test_ordered_map_preserves_order_in_json() {
    let mut map = OrderedMap::new();
    map.insert("c".to_string(), 3);
    map.insert("a".to_string(), 1);
    map.insert("b".to_string(), 2);

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"a":1,"b":2,"c":3}"#);
}

#[rstest]
fn test_duplicate_keys_keep_last_value() {
    let json = r#"{"a":1,"b":2,"a":3}"#;
    let map: OrderedMap<String, i32> = serde_json::from_str(json).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a"), Some(&3));
}

// =============================================================================
// Edge Case Tests
// =============================================================================

#[rstest]
fn test_empty_map() {
    let empty: OrderedMap<String, i32> = OrderedMap::new();
    assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");

    let restored: OrderedMap<String, i32> = serde_json::from_str("{}").unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn test_single_entry() {
    let mut map = OrderedMap::new();
    map.insert("key".to_string(), 42);
    assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"key":42}"#);
}

#[rstest]
#[case(r#""not a map""#)]
#[case(r#"[1, 2, 3]"#)]
#[case(r#"42"#)]
fn test_type_mismatch_error(#[case] json: &str) {
    let result: Result<OrderedMap<String, i32>, _> = serde_json::from_str(json);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("a map"));
}
