//! Semantic JSON type tags.
//!
//! Every decoded JSON value maps to exactly one [`JsonType`]. Booleans are
//! checked before numbers, and a number is an `integer` only when it was
//! written without a fraction or exponent.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

/// Semantic type tag of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// `true` / `false`.
    Boolean,
    /// Whole number without fractional or exponent representation.
    Integer,
    /// Any other number.
    Number,
    /// Text.
    String,
    /// Key-value mapping.
    Object,
    /// Ordered sequence.
    Array,
    /// `null`.
    Null,
}

impl JsonType {
    /// All tags, in classification precedence order.
    pub const ALL: [JsonType; 7] = [
        Self::Boolean,
        Self::Integer,
        Self::Number,
        Self::String,
        Self::Object,
        Self::Array,
        Self::Null,
    ];

    /// Classify a decoded JSON value.
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Bool(_) => Self::Boolean,
            JsonValue::Number(n) if is_integer_literal(n) => Self::Integer,
            JsonValue::Number(_) => Self::Number,
            JsonValue::String(_) => Self::String,
            JsonValue::Object(_) => Self::Object,
            JsonValue::Array(_) => Self::Array,
            JsonValue::Null => Self::Null,
        }
    }

    /// The schema name of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    /// Whether a value of this type satisfies a property declared as `declared`.
    ///
    /// Integers widen to `number`; nothing widens the other way.
    pub fn satisfies(&self, declared: JsonType) -> bool {
        *self == declared || (*self == Self::Integer && declared == Self::Number)
    }
}

/// Whether a number was written without a fraction or exponent.
///
/// Numbers keep their literal text, so integers past the 64-bit range are
/// still recognized.
pub(crate) fn is_integer_literal(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || !n.to_string().contains(|c| matches!(c, '.' | 'e' | 'E'))
}

/// Classify a decoded JSON value. Shorthand for [`JsonType::of`].
pub fn json_type(value: &JsonValue) -> JsonType {
    JsonType::of(value)
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown JSON type name '{0}'")]
pub struct UnknownJsonType(pub String);

impl FromStr for JsonType {
    type Err = UnknownJsonType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownJsonType(s.to_string()))
    }
}
