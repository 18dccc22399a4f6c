use modeldump_model::{EntitySchema, FieldDescriptor, FieldKind, SchemaRegistry};

// ── FieldDescriptor constructors ─────────────────────────────────

#[test]
fn scalar_field_has_no_target() {
    let f = FieldDescriptor::scalar("about");
    assert_eq!(f.name, "about");
    assert_eq!(f.kind, FieldKind::Scalar);
    assert!(f.target.is_none());
    assert!(f.choices.is_none());
}

#[test]
fn choice_field_keeps_options() {
    let f = FieldDescriptor::choice("status", &["Open", "Closed"]);
    assert_eq!(f.kind, FieldKind::Scalar);
    assert_eq!(f.choices.as_deref(), Some(&["Open".to_string(), "Closed".to_string()][..]));
}

#[test]
fn relation_constructors_set_target_and_via() {
    let fk = FieldDescriptor::to_one("user", "users.User");
    assert_eq!(fk.kind, FieldKind::ToOne);
    assert_eq!(fk.target.as_deref(), Some("users.User"));
    assert!(fk.via.is_none());

    let rev = FieldDescriptor::reverse_many("concerns", "management.Concern", "user");
    assert_eq!(rev.kind, FieldKind::ToMany);
    assert_eq!(rev.via.as_deref(), Some("user"));

    let one = FieldDescriptor::reverse_one("wallet", "finance.Wallet", "owner");
    assert_eq!(one.kind, FieldKind::ReverseOne);
}

// ── FieldKind ────────────────────────────────────────────────────

#[test]
fn relation_kinds() {
    assert!(FieldKind::ToOne.is_relation());
    assert!(FieldKind::ReverseOne.is_relation());
    assert!(FieldKind::ToMany.is_relation());
    assert!(!FieldKind::File.is_relation());
    assert!(!FieldKind::Json.is_relation());
}

#[test]
fn temporal_kinds() {
    assert!(FieldKind::Date.is_temporal());
    assert!(FieldKind::Time.is_temporal());
    assert!(FieldKind::DateTime.is_temporal());
    assert!(!FieldKind::Decimal.is_temporal());
}

#[test]
fn concrete_kinds() {
    assert!(FieldKind::ToOne.is_concrete());
    assert!(FieldKind::File.is_concrete());
    assert!(!FieldKind::ToMany.is_concrete());
    assert!(!FieldKind::ReverseOne.is_concrete());
}

#[test]
fn field_kind_serde_uses_snake_case() {
    assert_eq!(serde_json::to_string(&FieldKind::DateTime).unwrap(), "\"date_time\"");
    assert_eq!(serde_json::to_string(&FieldKind::ReverseOne).unwrap(), "\"reverse_one\"");
    assert_eq!(serde_json::to_string(&FieldKind::ToMany).unwrap(), "\"to_many\"");
}

// ── EntitySchema ─────────────────────────────────────────────────

fn make_concern_schema() -> EntitySchema {
    EntitySchema::new("management.Concern")
        .field(FieldDescriptor::to_one("user", "users.User"))
        .field(FieldDescriptor::scalar("about"))
        .field(FieldDescriptor::datetime("created_at"))
}

#[test]
fn schema_starts_with_id_primary_key() {
    let s = make_concern_schema();
    assert_eq!(s.pk_field, "id");
    assert_eq!(s.fields[0].name, "id");
    assert!(s.dumpable);
}

#[test]
fn schema_field_order_is_declaration_order() {
    let s = make_concern_schema();
    let names: Vec<&str> = s.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["id", "user", "about", "created_at"]);
}

#[test]
fn with_pk_replaces_default_key() {
    let s = EntitySchema::new("external.Document").with_pk("slug");
    assert_eq!(s.pk_field, "slug");
    assert!(s.get("id").is_none());
    assert_eq!(s.fields[0].name, "slug");
}

#[test]
fn opaque_clears_dump_capability() {
    assert!(!EntitySchema::new("auth.Group").opaque().dumpable);
}

#[test]
fn relations_filters_relation_fields() {
    let s = make_concern_schema();
    let rels: Vec<&str> = s.relations().map(|f| f.name.as_str()).collect();
    assert_eq!(rels, ["user"]);
}

#[test]
fn schema_deserializes_with_defaults() {
    let json = r#"{
        "entity_type": "demo.Partner",
        "fields": [
            {"name": "id", "kind": "scalar"},
            {"name": "partner", "kind": "to_one", "target": "demo.Partner"},
            {"name": "level", "kind": "scalar", "options": ["a", "b"]}
        ]
    }"#;
    let s: EntitySchema = serde_json::from_str(json).unwrap();
    assert_eq!(s.pk_field, "id");
    assert!(s.dumpable);
    assert_eq!(s.get("partner").unwrap().kind, FieldKind::ToOne);
    assert_eq!(s.get("level").unwrap().choices.as_ref().unwrap().len(), 2);
}

// ── SchemaRegistry ───────────────────────────────────────────────

#[test]
fn registry_register_and_get() {
    let reg = SchemaRegistry::new().with(make_concern_schema());
    assert_eq!(reg.len(), 1);
    assert!(reg.contains("management.Concern"));
    assert!(reg.get("users.User").is_none());
}

#[test]
fn registry_replaces_same_label() {
    let mut reg = SchemaRegistry::new();
    reg.register(make_concern_schema());
    reg.register(EntitySchema::new("management.Concern"));
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.get("management.Concern").unwrap().fields.len(), 1);
}
