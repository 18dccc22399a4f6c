//! Recursive, cycle-safe, relation-aware entity dumper.
//!
//! Turns a persisted entity into a plain JSON map for API responses:
//! - relation fields expand on request (`relations` paths or `expand_all`),
//!   otherwise to-one relations show their raw foreign key and collections
//!   are left out
//! - `exclude` paths always win over expansion
//! - each entity is expanded at most once per call; later encounters
//!   collapse to `{pk_field: pk}`, which breaks reference cycles
//! - dates become ISO-8601 strings, decimals strings, files their URL
//! - related objects without dump capability and fields that fail to
//!   resolve degrade locally and are reported as [`Diagnostic`]s
//!
//! ```ignore
//! let dumper = EntityDumper::new(DumpOptions::new().relations(["user"]));
//! let payload = dumper.dump(&concern)?;
//! ```

mod dumper;
mod error;
mod normalize;
mod options;

pub use dumper::{DumpReport, EntityDumper};
pub use error::{Diagnostic, DumpError, DumpResult};
pub use normalize::{file_url, normalize};
pub use options::DumpOptions;

use modeldump_model::Dumpable;
use serde_json::{Map, Value};

/// One-shot dump with explicit directives.
pub fn dump(
    entity: &dyn Dumpable,
    relations: &[&str],
    exclude: &[&str],
    expand_all: bool,
) -> DumpResult<Map<String, Value>> {
    let options = DumpOptions::new()
        .relations(relations.iter().copied())
        .exclude(exclude.iter().copied())
        .expand_all(expand_all);
    EntityDumper::new(options).dump(entity)
}
