//! Identity types for persisted entities.
//!
//! A [`PrimaryKey`] is the value of an entity's primary-key field. An
//! [`EntityKey`] pairs it with the entity type label so identities of
//! different types never collide inside a visited-set.

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// The value of an entity's primary-key field.
///
/// Serialized untagged so that `101`, `"slug"` and a hyphenated UUID all map
/// onto the natural JSON form. Deserialized strings go through
/// [`PrimaryKey::parse`], so `"7"` and `7` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum PrimaryKey {
    Int(i64),
    Uuid(Uuid),
    Text(String),
}

impl PrimaryKey {
    /// Builds a key from a JSON scalar.
    ///
    /// Integers map to [`PrimaryKey::Int`], strings that parse as a UUID map
    /// to [`PrimaryKey::Uuid`], other strings to [`PrimaryKey::Text`].
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| Error::InvalidPrimaryKey(n.to_string())),
            Value::String(s) => Ok(Self::parse(s)),
            other => Err(Error::InvalidPrimaryKey(other.to_string())),
        }
    }

    /// Parses a key from its textual form, preferring integer, then UUID.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if let Ok(n) = s.parse::<i64>() {
            return Self::Int(n);
        }
        match Uuid::parse_str(s) {
            Ok(uuid) => Self::Uuid(uuid),
            Err(_) => Self::Text(s.to_string()),
        }
    }

    /// JSON representation used in dump payloads and PK-only stubs.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Int(n) => Value::from(*n),
            Self::Uuid(u) => Value::String(u.to_string()),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

impl<'de> Deserialize<'de> for PrimaryKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = PrimaryKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or string primary key")
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<PrimaryKey, E> {
                Ok(PrimaryKey::Int(n))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<PrimaryKey, E> {
                i64::try_from(n)
                    .map(PrimaryKey::Int)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(n), &self))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<PrimaryKey, E> {
                Ok(PrimaryKey::parse(s))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl From<i64> for PrimaryKey {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for PrimaryKey {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<Uuid> for PrimaryKey {
    fn from(uuid: Uuid) -> Self {
        Self::Uuid(uuid)
    }
}

impl From<&str> for PrimaryKey {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for PrimaryKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidPrimaryKey("empty".into()));
        }
        Ok(Self::parse(s))
    }
}

/// Identity of one concrete entity: its type label plus primary key.
///
/// Labels follow the `app.Model` convention (e.g. `management.Concern`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    pub entity_type: String,
    pub pk: PrimaryKey,
}

impl EntityKey {
    #[must_use]
    pub fn new(entity_type: impl Into<String>, pk: impl Into<PrimaryKey>) -> Self {
        Self {
            entity_type: entity_type.into(),
            pk: pk.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.entity_type, self.pk)
    }
}
