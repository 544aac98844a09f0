//! Canonical JSON encoding and structural comparison.
//!
//! Two values are canonically equal when their canonical encodings match:
//! object keys sorted, no insignificant whitespace. Key order is irrelevant;
//! array order, numeric value and string content are significant, and an
//! integer never equals a fraction (`1` vs `1.0`).

use crate::json_type::is_integer_literal;
use serde_json::{Map, Number, Value as JsonValue};

/// Return a deep copy of `value` with every object's keys in sorted order.
///
/// The result encodes with sorted keys whether or not `serde_json` was built
/// with `preserve_order`.
pub fn sort_keys(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), sort_keys(&map[key.as_str()]));
            }
            JsonValue::Object(sorted)
        }
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Encode `value` canonically: sorted keys, `,` and `:` separators, no spaces.
///
/// Integers keep their exact digits. Fractions and exponents are written in
/// one shortest form, so `1e3` and `1000.0` encode alike.
pub fn canonical_json(value: &JsonValue) -> String {
    canonical(value).to_string()
}

fn canonical(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            entries
                .into_iter()
                .map(|(key, value)| (key.clone(), canonical(value)))
                .collect::<Map<_, _>>()
                .into()
        }
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(canonical).collect()),
        JsonValue::Number(n) => JsonValue::Number(canonical_number(n)),
        other => other.clone(),
    }
}

fn canonical_number(n: &Number) -> Number {
    if let Some(i) = n.as_i64() {
        return i.into();
    }
    if let Some(u) = n.as_u64() {
        return u.into();
    }
    if is_integer_literal(n) {
        return n.clone();
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .unwrap_or_else(|| n.clone())
}

/// Whether two values are identical for exact-match purposes.
pub fn canonical_eq(a: &JsonValue, b: &JsonValue) -> bool {
    canonical_json(a) == canonical_json(b)
}
