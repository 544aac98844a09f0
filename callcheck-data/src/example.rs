//! Raw and normalized training examples.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A raw dataset row: a JSON object with arbitrary keys.
pub type Row = Map<String, JsonValue>;

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }
}

/// Truthiness of a row field; absent fields are falsy.
pub fn field_is_truthy(row: &Row, key: &str) -> bool {
    row.get(key).is_some_and(is_truthy)
}

/// A normalized, unambiguous training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// Example id.
    pub id: String,
    /// Natural-language instruction.
    pub instruction: String,
    /// Key-sorted tool schema.
    pub tool_schema: JsonValue,
    /// Key-sorted gold call.
    pub target_call: JsonValue,
}

impl Example {
    /// Default id for the row at `index`.
    pub fn default_id(index: usize) -> String {
        format!("ex-{index:06}")
    }
}

/// Render a JSON value as text: strings verbatim, everything else as JSON.
pub(crate) fn text_of(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
