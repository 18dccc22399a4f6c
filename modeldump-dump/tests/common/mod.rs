#![allow(dead_code)]

use modeldump_model::catalog;
use modeldump_model::{
    EntitySchema, FieldDescriptor as F, MediaConfig, RecordRef, SchemaRegistry, Store,
};
use modeldump_types::PrimaryKey;
use serde_json::{json, Value};

pub const PARTNER: &str = "demo.Partner";
pub const NODE: &str = "demo.Node";

/// Site model store with one user, their concerns, messages and payments.
pub fn site_store() -> Store {
    let mut store = Store::new(catalog::site_registry())
        .with_media(MediaConfig::new("https://example.com/media/"));
    store
        .load_json(
            &json!({
                "records": [
                    {"entity_type": "auth.Group", "id": 7, "data": {"name": "staff"}},
                    {"entity_type": "users.User", "id": 1, "data": {
                        "password": "pbkdf2_sha256$hash",
                        "username": "amina",
                        "first_name": "Amina",
                        "email": "amina@example.com",
                        "is_staff": false,
                        "date_joined": "2025-04-18T22:21:43.609831Z",
                        "gender": "F",
                        "account_balance": "12.50",
                        "profile": "profiles/amina.webp",
                        "profile_cloud_url": "https://cloud.example.com/amina.webp",
                        "groups": [7]
                    }},
                    {"entity_type": "users.User", "id": 2, "data": {
                        "username": "otieno",
                        "profile": "",
                        "account_balance": null
                    }},
                    {"entity_type": "management.MemberGroup", "id": 3, "data": {
                        "name": "Readers", "members": [1, 2]
                    }},
                    {"entity_type": "management.Concern", "id": 101, "data": {
                        "user": 1,
                        "about": "Service Quality",
                        "details": "The service was not up to the expected standards.",
                        "response": null,
                        "status": "Open",
                        "updated_at": "2025-04-20T10:15:30.123456Z",
                        "created_at": "2025-04-18T22:21:43.609831Z"
                    }},
                    {"entity_type": "management.Concern", "id": 102, "data": {
                        "user": 1, "about": "Late refund", "status": "In Progress",
                        "created_at": "2025-04-19T08:30:00Z"
                    }},
                    {"entity_type": "management.PersonalMessage", "id": 21, "data": {"user": 1, "subject": "x1"}},
                    {"entity_type": "management.PersonalMessage", "id": 20, "data": {"user": 1, "subject": "x2"}},
                    {"entity_type": "management.PersonalMessage", "id": 22, "data": {"user": 1, "subject": "x3"}},
                    {"entity_type": "finance.Transaction", "id": 500, "data": {
                        "user": 1, "type": "Deposit", "amount": "12.50", "means": "M-PESA",
                        "reference": "QWE123", "metadata": {"channel": "paybill", "retries": [1, 2]},
                        "created_at": "2025-04-18T22:21:43.609831Z"
                    }}
                ]
            })
            .to_string(),
        )
        .expect("site fixture loads");
    store
}

pub fn demo_registry() -> SchemaRegistry {
    SchemaRegistry::new()
        .with(
            EntitySchema::new(PARTNER)
                .field(F::scalar("name"))
                .field(F::to_one("partner", PARTNER))
                .field(F::to_one("shared", NODE)),
        )
        .with(
            EntitySchema::new(NODE)
                .field(F::scalar("label"))
                .field(F::to_one("next", NODE))
                .field(F::to_many("links", NODE)),
        )
}

/// A and B point at each other and both at C.
pub fn partner_store() -> Store {
    let mut store = Store::new(demo_registry());
    store
        .load_json(
            &json!({
                "records": [
                    {"entity_type": PARTNER, "id": 1, "data": {"name": "A", "partner": 2, "shared": 30}},
                    {"entity_type": PARTNER, "id": 2, "data": {"name": "B", "partner": 1, "shared": 30}},
                    {"entity_type": NODE, "id": 30, "data": {"label": "C"}}
                ]
            })
            .to_string(),
        )
        .expect("partner fixture loads");
    store
}

pub fn get<'s>(store: &'s Store, entity_type: &str, id: i64) -> RecordRef<'s> {
    store
        .get(entity_type, &PrimaryKey::Int(id))
        .unwrap_or_else(|| panic!("{entity_type}#{id} missing"))
}

pub fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect()
}
