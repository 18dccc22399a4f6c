//! Core type definitions for modeldump.
//!
//! This crate defines the small, model-agnostic types the rest of the
//! workspace builds on:
//! - Entity identity ([`PrimaryKey`], [`EntityKey`])
//! - Relation paths and the prefix tree used for expand/exclude directives
//! - Temporal values with ISO-8601 rendering
//!
//! Field metadata and entity access live in `modeldump-model`.

mod ids;
mod path;
mod temporal;

pub use ids::{EntityKey, PrimaryKey};
pub use path::{PathTree, RelationPath};
pub use temporal::Temporal;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid primary key: {0}")]
    InvalidPrimaryKey(String),

    #[error("invalid relation path: {0:?}")]
    InvalidPath(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
