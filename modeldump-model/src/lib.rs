//! Entity model for modeldump.
//!
//! Defines the data-access contract the dumper consumes:
//! - [`EntitySchema`] / [`FieldDescriptor`] / [`FieldKind`] - per-type field
//!   metadata, registered once in a [`SchemaRegistry`]
//! - [`Identified`] and [`Dumpable`] - identity and field access, with dump
//!   capability checked through [`Identified::as_dumpable`]
//! - [`FieldValue`] / [`FileRef`] - typed values read from an entity
//! - [`Record`] and [`Store`] - a JSON-backed in-memory implementation
//! - [`catalog`] - schemas of the site's own data model

pub mod catalog;
mod descriptor;
mod entity;
mod error;
mod schema;
mod store;
mod value;

pub use descriptor::{Dumpable, Identified};
pub use entity::Record;
pub use error::{FieldAccessError, StoreError, StoreResult};
pub use schema::{EntitySchema, FieldDescriptor, FieldKind, SchemaRegistry};
pub use store::{Fixture, MediaConfig, RecordRef, Store};
pub use value::{FieldValue, FileRef};
