//! Metric aggregation over prediction batches.
//!
//! Each metric is an independent pure reduction over records. Rates are
//! `count / total`, and `0.0` for an empty denominator.

use crate::schema_check::check_record;
use crate::taxonomy::ErrorTag;
use callcheck_core::{canonical_eq, PredictionRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// `count / total`, or `0.0` when `total` is zero.
pub fn rate(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64
    } else {
        0.0
    }
}

/// Share of records whose output decoded to a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonValidityReport {
    /// `valid / total`.
    pub json_validity_rate: f64,
    /// Records with a decoded output.
    pub valid: usize,
    /// All records.
    pub total: usize,
}

impl JsonValidityReport {
    /// Aggregate a batch.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PredictionRecord>) -> Self {
        let (valid, total) = records
            .into_iter()
            .fold((0, 0), |(valid, total), record| {
                (valid + usize::from(record.has_parsed_output()), total + 1)
            });
        Self {
            json_validity_rate: rate(valid, total),
            valid,
            total,
        }
    }
}

/// Outcome of comparing one record against its gold call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExactMatch {
    /// Same tool name and canonically equal arguments.
    Match,
    /// Compared, but different.
    Mismatch,
    /// Not compared: the parsed output or the gold call is not a mapping.
    Skipped,
}

impl ExactMatch {
    /// Compare one record.
    pub fn of(record: &PredictionRecord) -> Self {
        let (Some(JsonValue::Object(pred)), Some(JsonValue::Object(gold))) =
            (&record.parsed_output, &record.target_call)
        else {
            return Self::Skipped;
        };

        let same_name = pred.get("name") == gold.get("name");
        if same_name && canonical_eq(&arguments_of(pred), &arguments_of(gold)) {
            Self::Match
        } else {
            Self::Mismatch
        }
    }
}

/// A call's `arguments`, defaulting to an empty mapping when absent.
fn arguments_of(call: &Map<String, JsonValue>) -> JsonValue {
    call.get("arguments")
        .cloned()
        .unwrap_or_else(|| JsonValue::Object(Map::new()))
}

/// Share of compared records that match the gold call exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExactMatchReport {
    /// `matches / total`.
    pub exact_match_rate: f64,
    /// Exact matches.
    pub matches: usize,
    /// Compared records; skipped records are not counted.
    pub total: usize,
    /// Records not compared because a side was not a mapping.
    pub skipped: usize,
}

impl ExactMatchReport {
    /// Aggregate a batch.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PredictionRecord>) -> Self {
        let mut report = Self::default();
        for record in records {
            match ExactMatch::of(record) {
                ExactMatch::Match => {
                    report.matches += 1;
                    report.total += 1;
                }
                ExactMatch::Mismatch => report.total += 1,
                ExactMatch::Skipped => {
                    tracing::debug!(id = %record.id, "exact match skipped non-mapping record");
                    report.skipped += 1;
                }
            }
        }
        report.exact_match_rate = rate(report.matches, report.total);
        report
    }
}

/// Share of records adhering to their schema, with a failure histogram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaAdherenceReport {
    /// `passes / total`.
    pub schema_adherence_rate: f64,
    /// Passing records.
    pub passes: usize,
    /// All records.
    pub total: usize,
    /// Failing records per tag; tags that never occurred are absent.
    pub error_taxonomy: BTreeMap<String, usize>,
}

impl SchemaAdherenceReport {
    /// Aggregate a batch.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PredictionRecord>) -> Self {
        let mut report = Self::default();
        for record in records {
            report.total += 1;
            match check_record(record).error() {
                None => report.passes += 1,
                Some(tag) => {
                    *report
                        .error_taxonomy
                        .entry(tag.as_str().to_string())
                        .or_insert(0) += 1;
                }
            }
        }
        report.schema_adherence_rate = rate(report.passes, report.total);
        report
    }

    /// Occurrences of one tag.
    pub fn count(&self, tag: ErrorTag) -> usize {
        self.error_taxonomy.get(tag.as_str()).copied().unwrap_or(0)
    }

    /// Failing records.
    pub fn failures(&self) -> usize {
        self.total - self.passes
    }
}
