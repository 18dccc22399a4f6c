//! In-memory data-access layer.
//!
//! A [`Store`] holds [`Record`]s of registered types and hands out
//! [`RecordRef`]s, which decode columns by field kind and follow relations by
//! looking related records up in the same store.

use bigdecimal::BigDecimal;
use modeldump_types::{EntityKey, PrimaryKey, Temporal};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::{
    Dumpable, EntitySchema, FieldAccessError, FieldDescriptor, FieldKind, FieldValue, FileRef,
    Identified, Record, SchemaRegistry,
};

/// Where stored files are served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_media_url")]
    pub media_url: String,
}

fn default_media_url() -> String {
    "/media/".into()
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            media_url: default_media_url(),
        }
    }
}

impl MediaConfig {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
        }
    }

    /// URL of a stored file name. Absolute `http(s)` names are kept as-is.
    pub fn url_for(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        if name.starts_with("http://") || name.starts_with("https://") {
            return Some(name.to_string());
        }
        let name = name.trim_start_matches('/');
        if self.media_url.ends_with('/') {
            Some(format!("{}{name}", self.media_url))
        } else {
            Some(format!("{}/{name}", self.media_url))
        }
    }
}

/// Serialized form of a set of records, as read from a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    pub records: Vec<Record>,
}

/// Records of registered entity types, kept in insertion order.
#[derive(Debug, Default)]
pub struct Store {
    registry: SchemaRegistry,
    media: MediaConfig,
    records: Vec<Record>,
    index: HashMap<EntityKey, usize>,
}

impl Store {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    pub fn with_media(mut self, media: MediaConfig) -> Self {
        self.media = media;
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Adds a record after checking its type, uniqueness and choice fields.
    pub fn insert(&mut self, record: Record) -> StoreResult<()> {
        let schema = self
            .registry
            .get(&record.entity_type)
            .ok_or_else(|| StoreError::UnknownEntityType(record.entity_type.clone()))?;

        if !record.data.is_object() {
            return Err(StoreError::InvalidData(format!(
                "{}: data must be a JSON object",
                record.key()
            )));
        }
        validate_choices(schema, &record)?;

        let key = record.key();
        if self.index.contains_key(&key) {
            return Err(StoreError::Duplicate(key));
        }
        self.index.insert(key, self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Inserts every record of a fixture, returning how many were added.
    pub fn load_fixture(&mut self, fixture: Fixture) -> StoreResult<usize> {
        let count = fixture.records.len();
        for record in fixture.records {
            self.insert(record)?;
        }
        debug!(count, total = self.records.len(), "Loaded fixture records");
        Ok(count)
    }

    pub fn load_json(&mut self, json: &str) -> StoreResult<usize> {
        let fixture: Fixture = serde_json::from_str(json)?;
        self.load_fixture(fixture)
    }

    pub fn load_file(&mut self, path: &Path) -> StoreResult<usize> {
        let json = std::fs::read_to_string(path)?;
        self.load_json(&json)
    }

    /// Looks up one record by type label and primary key.
    pub fn get(&self, entity_type: &str, pk: &PrimaryKey) -> Option<RecordRef<'_>> {
        let key = EntityKey::new(entity_type, pk.clone());
        let record = &self.records[*self.index.get(&key)?];
        let schema = self.registry.get(entity_type)?;
        Some(RecordRef {
            store: self,
            schema,
            record,
        })
    }

    /// Records of `entity_type` whose column `via` holds `pk`, either as a
    /// scalar foreign key or inside an array of keys.
    fn referencing<'s>(
        &'s self,
        entity_type: &'s str,
        via: &'s str,
        pk: &'s PrimaryKey,
    ) -> impl Iterator<Item = RecordRef<'s>> + 's {
        self.records
            .iter()
            .filter(move |r| r.entity_type == entity_type)
            .filter(move |r| match r.field(via) {
                Some(Value::Array(items)) => items.iter().any(|v| key_matches(v, pk)),
                Some(v) => key_matches(v, pk),
                None => false,
            })
            .filter_map(move |r| self.get(&r.entity_type, &r.id))
    }
}

fn key_matches(value: &Value, pk: &PrimaryKey) -> bool {
    PrimaryKey::from_json(value).is_ok_and(|k| &k == pk)
}

fn validate_choices(schema: &EntitySchema, record: &Record) -> StoreResult<()> {
    for field in &schema.fields {
        let Some(allowed) = &field.choices else {
            continue;
        };
        if let Some(Value::String(value)) = record.field(&field.name) {
            if !allowed.iter().any(|a| a == value) {
                return Err(StoreError::InvalidChoice {
                    entity: record.key(),
                    field: field.name.clone(),
                    value: value.clone(),
                    allowed: allowed.clone(),
                });
            }
        }
    }
    Ok(())
}

/// A record borrowed from a [`Store`], viewed through its schema.
#[derive(Debug, Clone, Copy)]
pub struct RecordRef<'s> {
    store: &'s Store,
    schema: &'s EntitySchema,
    record: &'s Record,
}

impl<'s> RecordRef<'s> {
    fn descriptor(&self, field: &str) -> Result<&'s FieldDescriptor, FieldAccessError> {
        self.schema
            .get(field)
            .ok_or_else(|| FieldAccessError::UnknownField {
                entity_type: self.schema.entity_type.clone(),
                field: field.to_string(),
            })
    }

    fn target(&self, desc: &'s FieldDescriptor) -> Result<&'s str, FieldAccessError> {
        desc.target.as_deref().ok_or_else(|| FieldAccessError::Decode {
            field: desc.name.clone(),
            reason: "relation has no target type".into(),
        })
    }

    fn via(&self, desc: &'s FieldDescriptor) -> Result<&'s str, FieldAccessError> {
        desc.via.as_deref().ok_or_else(|| FieldAccessError::Decode {
            field: desc.name.clone(),
            reason: "reverse relation has no back-reference field".into(),
        })
    }

    fn resolve(
        &self,
        field: &str,
        target: &str,
        pk: PrimaryKey,
    ) -> Result<Box<dyn Identified + 's>, FieldAccessError> {
        match self.store.get(target, &pk) {
            Some(related) => Ok(Box::new(related)),
            None => Err(FieldAccessError::Dangling {
                field: field.to_string(),
                key: EntityKey::new(target, pk),
            }),
        }
    }

    fn decode(&self, desc: &FieldDescriptor, raw: &Value) -> Result<FieldValue, FieldAccessError> {
        let field = desc.name.as_str();
        let bad = |reason: String| FieldAccessError::Decode {
            field: field.to_string(),
            reason,
        };
        let text = || raw.as_str().ok_or_else(|| bad(format!("expected a string, got {raw}")));

        match desc.kind {
            FieldKind::Scalar => match raw {
                Value::Bool(b) => Ok(FieldValue::Bool(*b)),
                Value::Number(n) => Ok(n
                    .as_i64()
                    .map(FieldValue::Int)
                    .or_else(|| n.as_f64().map(FieldValue::Float))
                    .unwrap_or(FieldValue::Null)),
                Value::String(s) => Ok(FieldValue::Text(s.clone())),
                other => Err(bad(format!("expected a scalar, got {other}"))),
            },
            FieldKind::Date => Temporal::parse_date(text()?)
                .map(FieldValue::Temporal)
                .map_err(|e| bad(e.to_string())),
            FieldKind::Time => Temporal::parse_time(text()?)
                .map(FieldValue::Temporal)
                .map_err(|e| bad(e.to_string())),
            FieldKind::DateTime => Temporal::parse_datetime(text()?)
                .map(FieldValue::Temporal)
                .map_err(|e| bad(e.to_string())),
            FieldKind::Decimal => {
                let repr = match raw {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    other => return Err(bad(format!("expected a decimal, got {other}"))),
                };
                BigDecimal::from_str(repr.trim())
                    .map(FieldValue::Decimal)
                    .map_err(|e| bad(e.to_string()))
            }
            FieldKind::Json => Ok(FieldValue::Json(raw.clone())),
            FieldKind::File => {
                let name = text()?;
                let cloud_url = self
                    .record
                    .field(&format!("{field}_cloud_url"))
                    .and_then(Value::as_str)
                    .map(String::from);
                Ok(FieldValue::File(FileRef {
                    name: name.to_string(),
                    url: self.store.media.url_for(name),
                    cloud_url,
                }))
            }
            FieldKind::ToOne => PrimaryKey::from_json(raw)
                .map(FieldValue::Key)
                .map_err(|e| bad(e.to_string())),
            FieldKind::ReverseOne | FieldKind::ToMany => Err(FieldAccessError::WrongKind {
                field: field.to_string(),
                expected: "concrete field",
            }),
        }
    }
}

impl Identified for RecordRef<'_> {
    fn schema(&self) -> &EntitySchema {
        self.schema
    }

    fn pk(&self) -> Option<PrimaryKey> {
        Some(self.record.id.clone())
    }

    fn as_dumpable(&self) -> Option<&dyn Dumpable> {
        if self.schema.dumpable { Some(self) } else { None }
    }
}

impl<'s> Dumpable for RecordRef<'s> {
    fn value(&self, field: &str) -> Result<FieldValue, FieldAccessError> {
        let desc = self.descriptor(field)?;
        if desc.name == self.schema.pk_field {
            return Ok(match &self.record.id {
                PrimaryKey::Int(n) => FieldValue::Int(*n),
                PrimaryKey::Uuid(u) => FieldValue::Uuid(*u),
                PrimaryKey::Text(s) => FieldValue::Text(s.clone()),
            });
        }
        if !desc.kind.is_concrete() {
            return Err(FieldAccessError::WrongKind {
                field: field.to_string(),
                expected: "concrete field",
            });
        }
        match self.record.field(field) {
            None | Some(Value::Null) => Ok(FieldValue::Null),
            Some(raw) => self.decode(desc, raw),
        }
    }

    fn related_one(&self, field: &str) -> Result<Option<Box<dyn Identified + '_>>, FieldAccessError> {
        let desc = self.descriptor(field)?;
        let target = self.target(desc)?;
        match desc.kind {
            FieldKind::ToOne => match self.value(field)? {
                FieldValue::Key(pk) => self.resolve(field, target, pk).map(Some),
                _ => Ok(None),
            },
            FieldKind::ReverseOne => {
                let via = self.via(desc)?;
                let record: &'s Record = self.record;
                Ok(self
                    .store
                    .referencing(target, via, &record.id)
                    .next()
                    .map(|r| Box::new(r) as Box<dyn Identified + '_>))
            }
            _ => Err(FieldAccessError::WrongKind {
                field: field.to_string(),
                expected: "to-one relation",
            }),
        }
    }

    fn related_many(&self, field: &str) -> Result<Vec<Box<dyn Identified + '_>>, FieldAccessError> {
        let desc = self.descriptor(field)?;
        if desc.kind != FieldKind::ToMany {
            return Err(FieldAccessError::WrongKind {
                field: field.to_string(),
                expected: "to-many relation",
            });
        }
        let target = self.target(desc)?;

        if let Some(via) = desc.via.as_deref() {
            let record: &'s Record = self.record;
            return Ok(self
                .store
                .referencing(target, via, &record.id)
                .map(|r| Box::new(r) as Box<dyn Identified + '_>)
                .collect());
        }

        match self.record.field(field) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|raw| {
                    let pk = PrimaryKey::from_json(raw).map_err(|e| FieldAccessError::Decode {
                        field: field.to_string(),
                        reason: e.to_string(),
                    })?;
                    self.resolve(field, target, pk)
                })
                .collect(),
            Some(other) => Err(FieldAccessError::Decode {
                field: field.to_string(),
                reason: format!("expected an array of keys, got {other}"),
            }),
        }
    }
}
