//! Conversion of typed field values into plain JSON.

use modeldump_model::{FieldKind, FieldValue, FileRef};
use serde_json::{Number, Value};

/// Converts one field value according to its declared kind.
///
/// - JSON fields pass JSON and primitives through, anything else is
///   stringified
/// - files become their URL or `null`
/// - temporal values become ISO-8601 strings, decimals strings
/// - everything else keeps its natural JSON form
pub fn normalize(kind: FieldKind, value: FieldValue, prefer_cloud_urls: bool) -> Value {
    match (kind, value) {
        (_, FieldValue::Null) => Value::Null,
        (FieldKind::Json, value) => structured(value),
        (_, FieldValue::File(file)) => file_url(&file, prefer_cloud_urls),
        (_, value) => plain(value),
    }
}

/// URL of a stored file, or `null` when nothing is stored or no URL resolves.
pub fn file_url(file: &FileRef, prefer_cloud_urls: bool) -> Value {
    if file.is_empty() {
        return Value::Null;
    }
    file.resolved_url(prefer_cloud_urls)
        .map_or(Value::Null, |url| Value::String(url.to_string()))
}

fn structured(value: FieldValue) -> Value {
    match value {
        FieldValue::Json(v) => v,
        v @ (FieldValue::Bool(_) | FieldValue::Int(_) | FieldValue::Float(_) | FieldValue::Text(_)) => {
            plain(v)
        }
        other => Value::String(other.to_string()),
    }
}

fn plain(value: FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Bool(b),
        FieldValue::Int(n) => Value::from(n),
        // NaN and infinities have no JSON form.
        FieldValue::Float(x) => Number::from_f64(x).map_or(Value::Null, Value::Number),
        FieldValue::Text(s) => Value::String(s),
        FieldValue::Uuid(u) => Value::String(u.to_string()),
        FieldValue::Temporal(t) => Value::String(t.to_iso()),
        FieldValue::Decimal(d) => Value::String(d.to_string()),
        FieldValue::Json(v) => v,
        FieldValue::File(file) => file_url(&file, false),
        FieldValue::Key(pk) => pk.to_json(),
    }
}
