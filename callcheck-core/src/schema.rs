//! Read-only interpretation of tool schemas.
//!
//! Schemas are authored elsewhere and arrive as arbitrary JSON, so every
//! accessor here is lenient: a section that is absent falls back to its
//! empty default, while a section that is present but has the wrong shape is
//! reported as `None` and its checks are skipped.
//!
//! ```rust
//! use callcheck_core::schema::SchemaView;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "name": "get_weather",
//!     "parameters": {
//!         "type": "object",
//!         "properties": {"city": {"type": "string"}},
//!         "required": ["city"]
//!     }
//! });
//! let view = SchemaView::new(&schema).unwrap();
//! assert_eq!(view.name(), Some("get_weather"));
//! let props = view.parameters().unwrap().properties().unwrap();
//! assert!(props.contains("city"));
//! ```

use crate::json_type::JsonType;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeSet;

/// Borrowed view over a tool schema mapping.
#[derive(Debug, Clone, Copy)]
pub struct SchemaView<'a> {
    schema: &'a Map<String, JsonValue>,
}

impl<'a> SchemaView<'a> {
    /// View `value` as a schema. Returns `None` unless it is a mapping.
    pub fn new(value: &'a JsonValue) -> Option<Self> {
        value.as_object().map(|schema| Self { schema })
    }

    /// Declared tool name, if it is a string.
    pub fn name(&self) -> Option<&'a str> {
        self.schema.get("name").and_then(JsonValue::as_str)
    }

    /// The `parameters` section. Absent means empty; non-mapping means `None`.
    pub fn parameters(&self) -> Option<ParametersView<'a>> {
        match self.schema.get("parameters") {
            None => Some(ParametersView { params: None }),
            Some(JsonValue::Object(params)) => Some(ParametersView {
                params: Some(params),
            }),
            Some(_) => None,
        }
    }
}

/// Borrowed view over a schema's `parameters` mapping.
#[derive(Debug, Clone, Copy)]
pub struct ParametersView<'a> {
    params: Option<&'a Map<String, JsonValue>>,
}

impl<'a> ParametersView<'a> {
    /// The `required` list. Absent means empty; non-list means `None`.
    pub fn required(&self) -> Option<&'a [JsonValue]> {
        match self.params.and_then(|p| p.get("required")) {
            None => Some(&[][..]),
            Some(JsonValue::Array(items)) => Some(items.as_slice()),
            Some(_) => None,
        }
    }

    /// The `properties` mapping. Absent means empty; non-mapping means `None`.
    pub fn properties(&self) -> Option<PropertiesView<'a>> {
        match self.params.and_then(|p| p.get("properties")) {
            None => Some(PropertiesView { props: None }),
            Some(JsonValue::Object(props)) => Some(PropertiesView { props: Some(props) }),
            Some(_) => None,
        }
    }
}

/// Borrowed view over a schema's declared properties.
#[derive(Debug, Clone, Copy)]
pub struct PropertiesView<'a> {
    props: Option<&'a Map<String, JsonValue>>,
}

impl<'a> PropertiesView<'a> {
    /// Whether `name` is a declared argument.
    pub fn contains(&self, name: &str) -> bool {
        self.props.is_some_and(|p| p.contains_key(name))
    }

    /// Type constraint of a declared argument, or `None` if undeclared.
    pub fn constraint(&self, name: &str) -> Option<TypeConstraint> {
        self.props
            .and_then(|p| p.get(name))
            .map(TypeConstraint::from_property)
    }

    /// Number of declared arguments.
    pub fn len(&self) -> usize {
        self.props.map_or(0, Map::len)
    }

    /// Whether no arguments are declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The set of type names a property accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeConstraint {
    /// No usable `type` declaration: any value is accepted.
    Any,
    /// Accepted type names, as written in the schema.
    ///
    /// Names are kept verbatim so that an unrecognized name (say `"float"`)
    /// constrains the property rather than silently widening it to `Any`.
    OneOf(BTreeSet<String>),
}

impl TypeConstraint {
    /// Interpret a property definition's `type` field.
    ///
    /// A single name or a list of names constrains the property; anything
    /// else (missing, empty list, non-mapping property) accepts any value.
    pub fn from_property(property: &JsonValue) -> Self {
        let Some(type_spec) = property.as_object().and_then(|p| p.get("type")) else {
            return Self::Any;
        };
        let names: BTreeSet<String> = match type_spec {
            JsonValue::String(name) => std::iter::once(name.clone()).collect(),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| match item {
                    JsonValue::String(name) => name.clone(),
                    other => other.to_string(),
                })
                .collect(),
            _ => BTreeSet::new(),
        };
        if names.is_empty() {
            Self::Any
        } else {
            Self::OneOf(names)
        }
    }

    /// Build a constraint from known tags.
    pub fn of(types: impl IntoIterator<Item = JsonType>) -> Self {
        let names: BTreeSet<String> = types.into_iter().map(|t| t.as_str().to_string()).collect();
        if names.is_empty() {
            Self::Any
        } else {
            Self::OneOf(names)
        }
    }

    /// Whether a value of type `actual` satisfies this constraint.
    ///
    /// An `integer` also satisfies a constraint that lists `number`.
    pub fn accepts_type(&self, actual: JsonType) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(names) => {
                names.contains(actual.as_str())
                    || (actual == JsonType::Integer
                        && names.contains(JsonType::Number.as_str()))
            }
        }
    }

    /// Whether `value` satisfies this constraint.
    pub fn accepts(&self, value: &JsonValue) -> bool {
        self.accepts_type(JsonType::of(value))
    }
}
