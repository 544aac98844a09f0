//! Prediction records.
//!
//! One record per evaluated example, produced by the inference step and
//! consumed once by each evaluator. Records are never mutated in place;
//! [`PredictionRecord::redecoded`] returns a fresh copy.

use crate::decode::{decode_output, DecodeMode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// One model prediction with its gold call and tool schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Example identifier.
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    /// Prompt shown to the model.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Raw model text.
    #[serde(default)]
    pub output: Option<String>,
    /// Decoded model output; `None` when decoding failed.
    #[serde(default)]
    pub parsed_output: Option<JsonValue>,
    /// Decoder message when decoding failed.
    #[serde(default)]
    pub error: Option<String>,
    /// Tool schema the model was given.
    #[serde(default)]
    pub tool_schema: Option<JsonValue>,
    /// Gold tool call.
    #[serde(default)]
    pub target_call: Option<JsonValue>,
}

impl PredictionRecord {
    /// Create a record with a gold call and nothing decoded yet.
    pub fn new(id: impl Into<String>, target_call: impl Into<JsonValue>) -> Self {
        Self {
            id: id.into(),
            target_call: Some(target_call.into()),
            ..Default::default()
        }
    }

    /// Build a record from raw model text, the way the inference step does.
    pub fn from_output(
        id: impl Into<String>,
        raw: &str,
        target_call: impl Into<JsonValue>,
        tool_schema: Option<JsonValue>,
        mode: DecodeMode,
    ) -> Self {
        let output = raw.trim().to_string();
        let decoded = decode_output(&output, mode);
        Self {
            id: id.into(),
            prompt: None,
            output: Some(output),
            parsed_output: decoded.parsed,
            error: decoded.error,
            tool_schema,
            target_call: Some(target_call.into()),
        }
    }

    /// Set the decoded output.
    #[must_use]
    pub fn with_parsed_output(mut self, parsed: impl Into<JsonValue>) -> Self {
        let parsed = parsed.into();
        self.parsed_output = if parsed.is_null() { None } else { Some(parsed) };
        self
    }

    /// Set the tool schema.
    #[must_use]
    pub fn with_tool_schema(mut self, schema: impl Into<JsonValue>) -> Self {
        self.tool_schema = Some(schema.into());
        self
    }

    /// Set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Whether the model output decoded to a value.
    pub fn has_parsed_output(&self) -> bool {
        self.parsed_output.is_some()
    }

    /// Copy of this record with `parsed_output` recomputed from the raw text.
    ///
    /// Records without raw text are returned unchanged.
    pub fn redecoded(&self, mode: DecodeMode) -> Self {
        let Some(raw) = self.output.as_deref() else {
            return self.clone();
        };
        let decoded = decode_output(raw, mode);
        Self {
            parsed_output: decoded.parsed,
            error: decoded.error,
            ..self.clone()
        }
    }
}

/// Accept string or numeric ids; `null` becomes empty.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => s,
        JsonValue::Null => String::new(),
        other => other.to_string(),
    })
}
