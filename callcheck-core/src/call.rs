//! Tool call type.

use crate::canonical::canonical_eq;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// The only keys a well-formed tool call may carry.
pub const CALL_KEYS: [&str; 2] = ["name", "arguments"];

/// A structured tool invocation: a function name plus named arguments.
///
/// Gold calls are usually built with this type; parsed model output is kept
/// as a raw [`JsonValue`] because it may not have this shape at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name.
    pub name: String,
    /// Argument name to value.
    #[serde(default)]
    pub arguments: Map<String, JsonValue>,
}

impl ToolCall {
    /// Create a call with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Map::new(),
        }
    }

    /// Add an argument.
    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// Read a call out of a JSON value.
    ///
    /// Returns `None` unless the value is a mapping with a string `name` and
    /// a mapping `arguments`. Extra keys are ignored here; shape validation is
    /// the schema adherence checker's job.
    pub fn from_value(value: &JsonValue) -> Option<Self> {
        let obj = value.as_object()?;
        let name = obj.get("name")?.as_str()?;
        let arguments = obj.get("arguments")?.as_object()?;
        Some(Self {
            name: name.to_string(),
            arguments: arguments.clone(),
        })
    }

    /// Convert to a JSON value.
    pub fn to_value(&self) -> JsonValue {
        let mut obj = Map::new();
        obj.insert("name".to_string(), JsonValue::String(self.name.clone()));
        obj.insert(
            "arguments".to_string(),
            JsonValue::Object(self.arguments.clone()),
        );
        JsonValue::Object(obj)
    }

    /// Same name and canonically equal arguments.
    pub fn matches(&self, other: &ToolCall) -> bool {
        self.name == other.name
            && canonical_eq(
                &JsonValue::Object(self.arguments.clone()),
                &JsonValue::Object(other.arguments.clone()),
            )
    }
}

impl From<ToolCall> for JsonValue {
    fn from(call: ToolCall) -> Self {
        call.to_value()
    }
}

impl From<&ToolCall> for JsonValue {
    fn from(call: &ToolCall) -> Self {
        call.to_value()
    }
}
