use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Describes an entity type's fields, primary key and dump capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Type label in `app.Model` form, e.g. `management.Concern`.
    pub entity_type: String,
    /// Name of the primary-key field. Defaults to `id`.
    #[serde(default = "default_pk_field")]
    pub pk_field: String,
    /// Fields in declaration order. The primary key is listed here too.
    pub fields: Vec<FieldDescriptor>,
    /// Whether instances of this type can be dumped recursively. Related
    /// objects of a non-dumpable type degrade to their primary key.
    #[serde(default = "default_dumpable")]
    pub dumpable: bool,
}

fn default_pk_field() -> String {
    "id".into()
}

fn default_dumpable() -> bool {
    true
}

impl EntitySchema {
    /// New dumpable schema with an integer `id` primary key.
    pub fn new(entity_type: &str) -> Self {
        Self {
            entity_type: entity_type.into(),
            pk_field: default_pk_field(),
            fields: vec![FieldDescriptor::scalar("id")],
            dumpable: true,
        }
    }

    /// Replaces the default `id` primary key with `name`.
    pub fn with_pk(mut self, name: &str) -> Self {
        self.fields.retain(|f| f.name != self.pk_field);
        self.pk_field = name.into();
        self.fields.insert(0, FieldDescriptor::scalar(name));
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Marks the type as lacking dump capability.
    pub fn opaque(mut self) -> Self {
        self.dumpable = false;
        self
    }

    /// Looks up a field descriptor by name.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Relation fields only, in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.kind.is_relation())
    }
}

/// One declared field of an entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Related entity type. Only meaningful for relation kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// For relations declared on the other side: the field on `target` that
    /// points back at this entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    /// Allowed values for string choice fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(alias = "options")]
    pub choices: Option<Vec<String>>,
}

impl FieldDescriptor {
    fn simple(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            target: None,
            via: None,
            choices: None,
        }
    }

    fn relation(name: &str, kind: FieldKind, target: &str, via: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind,
            target: Some(target.into()),
            via: via.map(String::from),
            choices: None,
        }
    }

    /// Shorthand for a plain string/number/boolean field.
    pub fn scalar(name: &str) -> Self {
        Self::simple(name, FieldKind::Scalar)
    }

    /// Shorthand for a string field restricted to fixed options.
    pub fn choice(name: &str, options: &[&str]) -> Self {
        Self {
            choices: Some(options.iter().map(|s| (*s).to_string()).collect()),
            ..Self::simple(name, FieldKind::Scalar)
        }
    }

    /// Shorthand for a calendar date field.
    pub fn date(name: &str) -> Self {
        Self::simple(name, FieldKind::Date)
    }

    /// Shorthand for a wall-clock time field.
    pub fn time(name: &str) -> Self {
        Self::simple(name, FieldKind::Time)
    }

    /// Shorthand for a datetime field.
    pub fn datetime(name: &str) -> Self {
        Self::simple(name, FieldKind::DateTime)
    }

    /// Shorthand for a fixed-point decimal field.
    pub fn decimal(name: &str) -> Self {
        Self::simple(name, FieldKind::Decimal)
    }

    /// Shorthand for a JSON blob field.
    pub fn json(name: &str) -> Self {
        Self::simple(name, FieldKind::Json)
    }

    /// Shorthand for a stored file or image field.
    pub fn file(name: &str) -> Self {
        Self::simple(name, FieldKind::File)
    }

    /// Foreign key to `target`. The local column holds the related key.
    pub fn to_one(name: &str, target: &str) -> Self {
        Self::relation(name, FieldKind::ToOne, target, None)
    }

    /// One-to-one declared on `target` by its field `via`.
    pub fn reverse_one(name: &str, target: &str, via: &str) -> Self {
        Self::relation(name, FieldKind::ReverseOne, target, Some(via))
    }

    /// Many-to-many whose related keys are stored locally as an array.
    pub fn to_many(name: &str, target: &str) -> Self {
        Self::relation(name, FieldKind::ToMany, target, None)
    }

    /// Reverse foreign key or reverse many-to-many declared on `target`
    /// by its field `via`.
    pub fn reverse_many(name: &str, target: &str, via: &str) -> Self {
        Self::relation(name, FieldKind::ToMany, target, Some(via))
    }
}

/// Storage kind of a field. Drives both decoding and dump normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Scalar,
    Date,
    Time,
    DateTime,
    Decimal,
    Json,
    File,
    /// Forward foreign key: a local column referencing one entity.
    ToOne,
    /// One-to-one declared on the related type; no local column.
    ReverseOne,
    /// Collection of related entities.
    ToMany,
}

impl FieldKind {
    pub fn is_relation(self) -> bool {
        matches!(self, Self::ToOne | Self::ReverseOne | Self::ToMany)
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::DateTime)
    }

    /// Whether the field is backed by a column on the entity itself.
    pub fn is_concrete(self) -> bool {
        !matches!(self, Self::ReverseOne | Self::ToMany)
    }
}

/// Schemas by type label, registered once at startup.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, EntitySchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema, replacing any previous one with the same label.
    pub fn register(&mut self, schema: EntitySchema) -> &mut Self {
        self.schemas.insert(schema.entity_type.clone(), schema);
        self
    }

    pub fn with(mut self, schema: EntitySchema) -> Self {
        self.register(schema);
        self
    }

    pub fn get(&self, entity_type: &str) -> Option<&EntitySchema> {
        self.schemas.get(entity_type)
    }

    pub fn contains(&self, entity_type: &str) -> bool {
        self.schemas.contains_key(entity_type)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntitySchema> {
        self.schemas.values()
    }
}
