//! Error types for entity access and the in-memory store.

use modeldump_types::EntityKey;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A single field of an entity could not be resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldAccessError {
    /// The schema does not declare the field.
    #[error("{entity_type} has no field {field:?}")]
    UnknownField { entity_type: String, field: String },

    /// The stored value does not match the declared kind.
    #[error("cannot decode {field:?}: {reason}")]
    Decode { field: String, reason: String },

    /// A foreign key points at a record that does not exist.
    #[error("{field:?} references missing {key}")]
    Dangling { field: String, key: EntityKey },

    /// A relation-only field was read as a value, or vice versa.
    #[error("{field:?} is not a {expected}")]
    WrongKind { field: String, expected: &'static str },
}

/// Errors that can occur while loading records into a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record of a type with no registered schema.
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    /// Two records share type and primary key.
    #[error("duplicate record: {0}")]
    Duplicate(EntityKey),

    /// Invalid data.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A choice field holds a value outside its options.
    #[error("{entity}.{field}: {value:?} is not one of {allowed:?}")]
    InvalidChoice {
        entity: EntityKey,
        field: String,
        value: String,
        allowed: Vec<String>,
    },
}
