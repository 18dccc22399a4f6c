use modeldump_types::{EntityKey, PrimaryKey};
use serde::{Deserialize, Serialize};

/// One persisted row, stored as a JSON object keyed by field name.
///
/// The `data` object holds concrete columns only. Its layout is interpreted
/// through the record's [`EntitySchema`](crate::EntitySchema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub entity_type: String,
    pub id: PrimaryKey,
    #[serde(default = "empty_object")]
    pub data: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Record {
    pub fn new(entity_type: &str, id: impl Into<PrimaryKey>, data: serde_json::Value) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
            data,
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.entity_type.clone(), self.id.clone())
    }

    /// Raw column value by field name. `None` when the column is absent.
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.get(name)
    }
}
