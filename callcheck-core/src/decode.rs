//! Decoding raw model text into a parsed tool call.
//!
//! The inference step stores the decoded value as `parsed_output` and the
//! decoder message as `error`. [`DecodeMode::Strict`] reproduces that step
//! exactly; [`DecodeMode::Lenient`] additionally digs a JSON document out of
//! markdown fences or surrounding prose.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// How raw model output is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// The whole trimmed text must be one JSON document.
    #[default]
    Strict,
    /// Fall back to extracting JSON from code fences or prose.
    Lenient,
}

impl fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Lenient => f.write_str("lenient"),
        }
    }
}

/// Outcome of decoding one raw output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    /// Decoded value; `None` when decoding failed or the text was `null`.
    pub parsed: Option<JsonValue>,
    /// Decoder message when decoding failed.
    pub error: Option<String>,
}

impl Decoded {
    fn ok(value: JsonValue) -> Self {
        Self {
            // A literal `null` is stored as absent, exactly like a failure.
            parsed: if value.is_null() { None } else { Some(value) },
            error: None,
        }
    }

    fn failed(error: impl fmt::Display) -> Self {
        Self {
            parsed: None,
            error: Some(error.to_string()),
        }
    }

    /// Whether a value was decoded.
    pub fn is_ok(&self) -> bool {
        self.parsed.is_some()
    }
}

/// Decode raw model text.
pub fn decode_output(raw: &str, mode: DecodeMode) -> Decoded {
    let text = raw.trim();
    let strict_err = match serde_json::from_str::<JsonValue>(text) {
        Ok(value) => return Decoded::ok(value),
        Err(e) => e,
    };

    if mode == DecodeMode::Lenient {
        if let Some(value) = extract_json(text) {
            tracing::debug!("decoded JSON embedded in surrounding text");
            return Decoded::ok(value);
        }
    }

    Decoded::failed(strict_err)
}

/// Extract a JSON document from text that wraps it in fences or prose.
///
/// Tries, in order: a ```` ```json ```` fence, a plain ```` ``` ```` fence at
/// the start of the text, then the first balanced `{...}` object.
pub fn extract_json(text: &str) -> Option<JsonValue> {
    let text = text.trim();
    from_json_fence(text)
        .or_else(|| from_plain_fence(text))
        .or_else(|| first_object(text))
}

fn parse(candidate: &str) -> Option<JsonValue> {
    serde_json::from_str(candidate.trim()).ok()
}

fn from_json_fence(text: &str) -> Option<JsonValue> {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    let start = lower.find("```json")? + "```json".len();
    let end = text[start..].find("```")?;
    parse(&text[start..start + end])
}

fn from_plain_fence(text: &str) -> Option<JsonValue> {
    let rest = text.strip_prefix("```")?;
    // Skip an optional language tag on the opening line.
    let body_start = rest.find('\n').map_or(0, |i| i + 1);
    let body = &rest[body_start..];
    let end = body.find("```")?;
    parse(&body[..end])
}

fn first_object(text: &str) -> Option<JsonValue> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return parse(&text[start..=start + i]);
                }
            }
            _ => {}
        }
    }
    None
}
