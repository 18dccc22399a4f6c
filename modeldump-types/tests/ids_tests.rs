use modeldump_types::{EntityKey, PrimaryKey};
use serde_json::json;
use std::collections::HashSet;
use std::str::FromStr;

// ── PrimaryKey ────────────────────────────────────────────────────

#[test]
fn primary_key_from_json_integer() {
    assert_eq!(PrimaryKey::from_json(&json!(101)).unwrap(), PrimaryKey::Int(101));
}

#[test]
fn primary_key_from_json_string() {
    assert_eq!(
        PrimaryKey::from_json(&json!("terms-of-service")).unwrap(),
        PrimaryKey::Text("terms-of-service".into())
    );
}

#[test]
fn primary_key_from_json_uuid_string() {
    let uuid = uuid::Uuid::new_v4();
    assert_eq!(
        PrimaryKey::from_json(&json!(uuid.to_string())).unwrap(),
        PrimaryKey::Uuid(uuid)
    );
}

#[test]
fn primary_key_from_json_rejects_float_and_null() {
    assert!(PrimaryKey::from_json(&json!(1.5)).is_err());
    assert!(PrimaryKey::from_json(&json!(null)).is_err());
    assert!(PrimaryKey::from_json(&json!([1])).is_err());
}

#[test]
fn primary_key_parse_prefers_integer() {
    assert_eq!(PrimaryKey::parse("42"), PrimaryKey::Int(42));
    assert_eq!(PrimaryKey::parse("-7"), PrimaryKey::Int(-7));
    assert_eq!(PrimaryKey::parse("abc"), PrimaryKey::Text("abc".into()));
}

#[test]
fn primary_key_from_str_rejects_empty() {
    assert!(PrimaryKey::from_str("").is_err());
    assert_eq!(PrimaryKey::from_str("9").unwrap(), PrimaryKey::Int(9));
}

#[test]
fn primary_key_to_json() {
    assert_eq!(PrimaryKey::Int(3).to_json(), json!(3));
    assert_eq!(PrimaryKey::Text("x".into()).to_json(), json!("x"));
    let uuid = uuid::Uuid::new_v4();
    assert_eq!(PrimaryKey::Uuid(uuid).to_json(), json!(uuid.to_string()));
}

#[test]
fn primary_key_display() {
    assert_eq!(PrimaryKey::Int(12).to_string(), "12");
    assert_eq!(PrimaryKey::from("slug").to_string(), "slug");
}

#[test]
fn primary_key_serde_is_untagged() {
    assert_eq!(serde_json::to_value(PrimaryKey::Int(5)).unwrap(), json!(5));
    let back: PrimaryKey = serde_json::from_value(json!(5)).unwrap();
    assert_eq!(back, PrimaryKey::Int(5));
    let text: PrimaryKey = serde_json::from_value(json!("about")).unwrap();
    assert_eq!(text, PrimaryKey::Text("about".into()));
}

#[test]
fn numeric_strings_deserialize_like_parse() {
    let from_serde: PrimaryKey = serde_json::from_value(json!("7")).unwrap();
    assert_eq!(from_serde, PrimaryKey::Int(7));
    assert_eq!(from_serde, PrimaryKey::parse("7"));
    assert_eq!(from_serde, PrimaryKey::from_json(&json!("7")).unwrap());

    let uuid = uuid::Uuid::new_v4();
    let from_serde: PrimaryKey = serde_json::from_value(json!(uuid.to_string())).unwrap();
    assert_eq!(from_serde, PrimaryKey::Uuid(uuid));
}

#[test]
fn deserialize_rejects_non_scalar_keys() {
    assert!(serde_json::from_value::<PrimaryKey>(json!(1.5)).is_err());
    assert!(serde_json::from_value::<PrimaryKey>(json!({"id": 1})).is_err());
    assert!(serde_json::from_value::<PrimaryKey>(json!(u64::MAX)).is_err());
}

// ── EntityKey ─────────────────────────────────────────────────────

#[test]
fn entity_key_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(EntityKey::new("management.Concern", 1));
    set.insert(EntityKey::new("management.Concern", 1));
    assert_eq!(set.len(), 1);
}

#[test]
fn entity_keys_with_same_pk_but_different_type_differ() {
    let a = EntityKey::new("users.User", 1);
    let b = EntityKey::new("management.Concern", 1);
    assert_ne!(a, b);
}

#[test]
fn entity_key_display() {
    assert_eq!(
        EntityKey::new("finance.Transaction", 7).to_string(),
        "finance.Transaction#7"
    );
}
