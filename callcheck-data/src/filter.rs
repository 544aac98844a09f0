//! Filtering raw rows down to unambiguous training examples.
//!
//! A row survives when it is not flagged ambiguous, carries an instruction
//! and a schema, and its gold call has both `name` and `arguments`. With
//! [`FilterOptions::validate_targets`] the gold call must also pass the
//! schema adherence checker against the row's own schema.

use crate::error::Result;
use crate::example::{field_is_truthy, text_of, Example, Row};
use callcheck_core::{read_jsonl, sort_keys, write_jsonl};
use callcheck_evals::{check_call, Verdict};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::Path;

/// Drop reason for rows failing the unambiguity test.
pub const AMBIGUOUS: &str = "ambiguous";

/// Filtering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Also drop rows whose gold call violates their own schema.
    pub validate_targets: bool,
}

impl FilterOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable gold-call validation.
    pub fn validate_targets(mut self) -> Self {
        self.validate_targets = true;
        self
    }
}

/// Result of filtering a batch of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOutcome {
    /// Normalized surviving examples, in input order.
    pub kept: Vec<Example>,
    /// Rows dropped.
    pub dropped: usize,
    /// Dropped rows per reason.
    pub drop_reasons: BTreeMap<String, usize>,
}

impl FilterOutcome {
    fn record_drop(&mut self, reason: &str) {
        self.dropped += 1;
        *self.drop_reasons.entry(reason.to_string()).or_insert(0) += 1;
    }
}

/// Whether a row is usable as a training example.
pub fn is_unambiguous(row: &Row) -> bool {
    if field_is_truthy(row, "ambiguous") {
        return false;
    }
    if !field_is_truthy(row, "instruction") || !field_is_truthy(row, "tool_schema") {
        return false;
    }
    match row.get("target_call") {
        Some(JsonValue::Object(call)) => call.contains_key("name") && call.contains_key("arguments"),
        _ => false,
    }
}

/// Normalize a row already known to be unambiguous.
///
/// `index` is the row's 0-based position in the input and only supplies the
/// default id.
pub fn normalize(row: &Row, index: usize) -> Example {
    let field = |key: &str| row.get(key).map(sort_keys).unwrap_or(JsonValue::Null);
    Example {
        id: row
            .get("id")
            .filter(|id| !id.is_null())
            .map(text_of)
            .unwrap_or_else(|| Example::default_id(index)),
        instruction: row.get("instruction").map(text_of).unwrap_or_default(),
        tool_schema: field("tool_schema"),
        target_call: field("target_call"),
    }
}

/// Filter and normalize a batch of rows.
pub fn filter_examples(rows: impl IntoIterator<Item = Row>, options: FilterOptions) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for (index, row) in rows.into_iter().enumerate() {
        if !is_unambiguous(&row) {
            outcome.record_drop(AMBIGUOUS);
            continue;
        }
        let example = normalize(&row, index);
        if options.validate_targets {
            let verdict = check_call(
                Some(&example.target_call),
                Some(&example.tool_schema),
                None,
            );
            if let Verdict::Fail(tag) = verdict {
                tracing::debug!(id = %example.id, %tag, "gold call fails its own schema");
                outcome.record_drop(tag.as_str());
                continue;
            }
        }
        outcome.kept.push(example);
    }

    tracing::info!(
        kept = outcome.kept.len(),
        dropped = outcome.dropped,
        "filtered examples"
    );
    outcome
}

/// Filter a JSONL file of raw rows into a JSONL file of examples.
pub fn filter_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: FilterOptions,
) -> Result<FilterOutcome> {
    let rows: Vec<Row> = read_jsonl(input)?;
    let outcome = filter_examples(rows, options);
    write_jsonl(output, &outcome.kept)?;
    Ok(outcome)
}
