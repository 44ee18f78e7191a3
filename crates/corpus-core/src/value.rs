//! Helpers for loosely typed stored values.

use serde_json::Value;

/// Returns `true` unless `value` is null, `false`, zero, or an empty string,
/// list or object. Stored flags and optional metadata are read this way.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
