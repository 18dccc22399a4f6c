//! Error and diagnostic types for the dumper.

use modeldump_types::PrimaryKey;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for dump operations.
pub type DumpResult<T> = Result<T, DumpError>;

/// Structural misuse that aborts a dump.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DumpError {
    /// The root entity has no primary key to identify it by.
    #[error("cannot dump {entity_type}: entity has no primary key")]
    InvalidIdentity { entity_type: String },
}

/// A non-fatal problem met while dumping. The affected field degraded and
/// the dump carried on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A related entity's type cannot be dumped; only its key was emitted.
    MissingDumpCapability {
        path: String,
        entity_type: String,
        pk: Option<PrimaryKey>,
    },

    /// A field could not be resolved and was emitted as `null`.
    FieldAccessFailure {
        path: String,
        entity_type: String,
        reason: String,
    },
}

impl Diagnostic {
    /// Dotted path of the affected field, from the root entity.
    pub fn path(&self) -> &str {
        match self {
            Self::MissingDumpCapability { path, .. } | Self::FieldAccessFailure { path, .. } => path,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDumpCapability {
                path,
                entity_type,
                pk,
            } => match pk {
                Some(pk) => write!(f, "{path}: {entity_type}#{pk} has no dump capability"),
                None => write!(f, "{path}: {entity_type} has no dump capability"),
            },
            Self::FieldAccessFailure {
                path,
                entity_type,
                reason,
            } => write!(f, "{path}: {entity_type} field unavailable: {reason}"),
        }
    }
}
