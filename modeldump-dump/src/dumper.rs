use modeldump_model::{Dumpable, FieldAccessError, FieldDescriptor, FieldKind, FieldValue, Identified};
use modeldump_types::{EntityKey, PathTree};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::{Diagnostic, DumpError, DumpResult};
use crate::normalize::normalize;
use crate::DumpOptions;

static NO_PATHS: PathTree = PathTree::new();

/// Output of one top-level dump: the payload plus whatever degraded on the
/// way.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpReport {
    pub payload: Map<String, Value>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Dumps entities into nested JSON maps.
///
/// The dumper only holds its parsed options. All per-call state lives in a
/// [`DumpContext`] created by each top-level call, so one dumper can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct EntityDumper {
    options: DumpOptions,
    relations: PathTree,
    exclude: PathTree,
}

/// State of one top-level call. Dropped when the call returns, success or not.
#[derive(Debug, Default)]
struct DumpContext {
    visited: HashSet<EntityKey>,
    path: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl DumpContext {
    fn path_string(&self) -> String {
        self.path.join(".")
    }

    fn missing_capability(&mut self, related: &dyn Identified) {
        let path = self.path_string();
        let entity_type = related.schema().entity_type.clone();
        let pk = related.pk();
        warn!(
            path = %path,
            entity_type = %entity_type,
            "Related entity has no dump capability, emitting primary key only"
        );
        self.diagnostics.push(Diagnostic::MissingDumpCapability {
            path,
            entity_type,
            pk,
        });
    }

    fn access_failure(&mut self, owner: &dyn Identified, reason: String) {
        let path = self.path_string();
        let entity_type = owner.schema().entity_type.clone();
        warn!(path = %path, entity_type = %entity_type, reason = %reason, "Field unavailable, emitting null");
        self.diagnostics.push(Diagnostic::FieldAccessFailure {
            path,
            entity_type,
            reason,
        });
    }

    fn field_error(&mut self, owner: &dyn Identified, error: &FieldAccessError) {
        self.access_failure(owner, error.to_string());
    }
}

impl EntityDumper {
    pub fn new(options: DumpOptions) -> Self {
        let relations = PathTree::from_paths(&options.relations);
        let exclude = PathTree::from_paths(&options.exclude);
        Self {
            options,
            relations,
            exclude,
        }
    }

    /// Dumps `entity` and the relations selected by the options.
    pub fn dump(&self, entity: &dyn Dumpable) -> DumpResult<Map<String, Value>> {
        self.dump_report(entity).map(|report| report.payload)
    }

    /// Like [`dump`](Self::dump), also returning the diagnostics.
    pub fn dump_report(&self, entity: &dyn Dumpable) -> DumpResult<DumpReport> {
        let key = entity.key().ok_or_else(|| DumpError::InvalidIdentity {
            entity_type: entity.schema().entity_type.clone(),
        })?;

        let mut ctx = DumpContext::default();
        let payload = self.dump_entity(entity, key, &self.relations, &self.exclude, &mut ctx);
        Ok(DumpReport {
            payload,
            diagnostics: ctx.diagnostics,
        })
    }

    /// Dumps each entity as its own top-level call, for list responses.
    pub fn dump_all<'a, I>(&self, entities: I) -> DumpResult<Vec<Map<String, Value>>>
    where
        I: IntoIterator<Item = &'a dyn Dumpable>,
    {
        entities.into_iter().map(|e| self.dump(e)).collect()
    }

    fn dump_entity(
        &self,
        entity: &dyn Dumpable,
        key: EntityKey,
        relations: &PathTree,
        exclude: &PathTree,
        ctx: &mut DumpContext,
    ) -> Map<String, Value> {
        if ctx.visited.contains(&key) {
            debug!(key = %key, "Already dumped in this call, collapsing to primary key");
            return pk_stub(entity.schema().pk_field.as_str(), Some(&key.pk));
        }
        ctx.visited.insert(key);

        let mut payload = Map::new();
        for field in &entity.schema().fields {
            let name = field.name.as_str();
            if exclude.is_leaf_listed(name) {
                continue;
            }

            ctx.path.push(name.to_string());
            let value = self.dump_field(entity, field, relations, exclude, ctx);
            ctx.path.pop();

            if let Some(value) = value {
                payload.insert(name.to_string(), value);
            }
        }
        payload
    }

    /// `None` means the field is left out of the payload.
    fn dump_field(
        &self,
        entity: &dyn Dumpable,
        field: &FieldDescriptor,
        relations: &PathTree,
        exclude: &PathTree,
        ctx: &mut DumpContext,
    ) -> Option<Value> {
        let name = field.name.as_str();
        let suppressed = exclude.child(name).is_some_and(PathTree::is_listed);
        let expand = field.kind.is_relation()
            && !suppressed
            && (relations.contains(name) || self.options.expand_all);

        let nested = Nested {
            relations: relations.child(name).unwrap_or(&NO_PATHS),
            exclude: exclude.child(name).unwrap_or(&NO_PATHS),
        };

        match field.kind {
            FieldKind::ToOne => Some(self.dump_to_one(entity, name, expand, &nested, ctx)),
            FieldKind::ReverseOne => expand.then(|| self.dump_reverse_one(entity, name, &nested, ctx)),
            FieldKind::ToMany => expand.then(|| self.dump_to_many(entity, name, &nested, ctx)),
            kind => Some(match entity.value(name) {
                Ok(value) => normalize(kind, value, self.options.prefer_cloud_urls),
                Err(e) => {
                    ctx.field_error(entity, &e);
                    Value::Null
                }
            }),
        }
    }

    fn dump_to_one(
        &self,
        entity: &dyn Dumpable,
        name: &str,
        expand: bool,
        nested: &Nested<'_>,
        ctx: &mut DumpContext,
    ) -> Value {
        if !expand {
            return raw_foreign_key(entity, name, ctx);
        }
        match entity.related_one(name) {
            Ok(None) => Value::Null,
            Ok(Some(related)) => match related.as_dumpable() {
                Some(dumpable) => self.dump_related(dumpable, nested, ctx),
                None => {
                    ctx.missing_capability(related.as_ref());
                    raw_foreign_key(entity, name, ctx)
                }
            },
            Err(e) => {
                ctx.field_error(entity, &e);
                Value::Null
            }
        }
    }

    fn dump_reverse_one(
        &self,
        entity: &dyn Dumpable,
        name: &str,
        nested: &Nested<'_>,
        ctx: &mut DumpContext,
    ) -> Value {
        match entity.related_one(name) {
            Ok(None) => Value::Null,
            Ok(Some(related)) => self.dump_member(related.as_ref(), nested, ctx),
            Err(e) => {
                ctx.field_error(entity, &e);
                Value::Null
            }
        }
    }

    fn dump_to_many(
        &self,
        entity: &dyn Dumpable,
        name: &str,
        nested: &Nested<'_>,
        ctx: &mut DumpContext,
    ) -> Value {
        match entity.related_many(name) {
            Ok(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.dump_member(item.as_ref(), nested, ctx))
                    .collect(),
            ),
            Err(e) => {
                ctx.field_error(entity, &e);
                Value::Null
            }
        }
    }

    /// Nested dump of a related object, or a PK-only stub when its type
    /// cannot be dumped.
    fn dump_member(&self, related: &dyn Identified, nested: &Nested<'_>, ctx: &mut DumpContext) -> Value {
        match related.as_dumpable() {
            Some(dumpable) => self.dump_related(dumpable, nested, ctx),
            None => {
                ctx.missing_capability(related);
                Value::Object(pk_stub(&related.schema().pk_field, related.pk().as_ref()))
            }
        }
    }

    fn dump_related(&self, related: &dyn Dumpable, nested: &Nested<'_>, ctx: &mut DumpContext) -> Value {
        match related.key() {
            Some(key) => Value::Object(self.dump_entity(related, key, nested.relations, nested.exclude, ctx)),
            None => {
                ctx.access_failure(related, "related entity has no primary key".into());
                Value::Null
            }
        }
    }
}

/// Directives that apply below one relation field.
struct Nested<'t> {
    relations: &'t PathTree,
    exclude: &'t PathTree,
}

fn raw_foreign_key(entity: &dyn Dumpable, name: &str, ctx: &mut DumpContext) -> Value {
    match entity.value(name) {
        Ok(FieldValue::Key(pk)) => pk.to_json(),
        Ok(FieldValue::Null) => Value::Null,
        Ok(other) => {
            ctx.access_failure(entity, format!("expected a foreign key, got {other}"));
            Value::Null
        }
        Err(e) => {
            ctx.field_error(entity, &e);
            Value::Null
        }
    }
}

fn pk_stub(pk_field: &str, pk: Option<&modeldump_types::PrimaryKey>) -> Map<String, Value> {
    let mut stub = Map::new();
    stub.insert(
        pk_field.to_string(),
        pk.map_or(Value::Null, modeldump_types::PrimaryKey::to_json),
    );
    stub
}
