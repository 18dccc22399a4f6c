use modeldump_types::{EntityKey, PrimaryKey};

use crate::{EntitySchema, FieldAccessError, FieldValue};

/// The minimum any persisted entity offers: its schema and identity.
///
/// Related objects are handed out as `dyn Identified`. Whether they can be
/// expanded is decided by [`Identified::as_dumpable`], never by probing.
pub trait Identified {
    fn schema(&self) -> &EntitySchema;

    /// Primary-key value, or `None` for an entity that was never persisted.
    fn pk(&self) -> Option<PrimaryKey>;

    /// Type label plus primary key.
    fn key(&self) -> Option<EntityKey> {
        self.pk()
            .map(|pk| EntityKey::new(self.schema().entity_type.clone(), pk))
    }

    /// Capability check for recursive dumping.
    ///
    /// Implementors of [`Dumpable`] return `Some(self)`.
    fn as_dumpable(&self) -> Option<&dyn Dumpable> {
        None
    }
}

/// Field-level access to an entity, enough to dump it recursively.
///
/// Every accessor is fallible: a lazily resolved value may fail to load
/// without that being fatal to the caller.
pub trait Dumpable: Identified {
    /// Value of a concrete field. For to-one relations this is the raw
    /// foreign key ([`FieldValue::Key`]) or [`FieldValue::Null`].
    fn value(&self, field: &str) -> Result<FieldValue, FieldAccessError>;

    /// Follows a to-one or reverse one-to-one relation.
    fn related_one(&self, field: &str) -> Result<Option<Box<dyn Identified + '_>>, FieldAccessError>;

    /// Follows a to-many relation, in the collection's natural order.
    fn related_many(&self, field: &str) -> Result<Vec<Box<dyn Identified + '_>>, FieldAccessError>;
}
