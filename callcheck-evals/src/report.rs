//! Metrics reports and their output.
//!
//! Reports render as pretty-printed JSON with recursively sorted keys. They
//! are always written to standard output and optionally duplicated to a file.

use crate::error::EvalResult;
use crate::evaluator::MetricKind;
use crate::metrics::{ExactMatchReport, JsonValidityReport, SchemaAdherenceReport};
use crate::taxonomy::Verdict;
use callcheck_core::sort_keys;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Result of one metric over a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricsReport {
    /// JSON validity.
    JsonValidity(JsonValidityReport),
    /// Exact match.
    ExactMatch(ExactMatchReport),
    /// Schema adherence.
    SchemaAdherence(SchemaAdherenceReport),
}

impl MetricsReport {
    /// The metric this report is for.
    pub fn kind(&self) -> MetricKind {
        match self {
            Self::JsonValidity(_) => MetricKind::JsonValidity,
            Self::ExactMatch(_) => MetricKind::ExactMatch,
            Self::SchemaAdherence(_) => MetricKind::SchemaAdherence,
        }
    }

    /// The headline rate.
    pub fn rate(&self) -> f64 {
        match self {
            Self::JsonValidity(r) => r.json_validity_rate,
            Self::ExactMatch(r) => r.exact_match_rate,
            Self::SchemaAdherence(r) => r.schema_adherence_rate,
        }
    }

    /// Records in the denominator.
    pub fn total(&self) -> usize {
        match self {
            Self::JsonValidity(r) => r.total,
            Self::ExactMatch(r) => r.total,
            Self::SchemaAdherence(r) => r.total,
        }
    }

    /// Key-sorted JSON value.
    pub fn to_value(&self) -> EvalResult<JsonValue> {
        Ok(sort_keys(&serde_json::to_value(self)?))
    }

    /// Pretty-printed JSON with sorted keys.
    pub fn to_json(&self) -> EvalResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_value()?)?)
    }
}

impl From<JsonValidityReport> for MetricsReport {
    fn from(report: JsonValidityReport) -> Self {
        Self::JsonValidity(report)
    }
}

impl From<ExactMatchReport> for MetricsReport {
    fn from(report: ExactMatchReport) -> Self {
        Self::ExactMatch(report)
    }
}

impl From<SchemaAdherenceReport> for MetricsReport {
    fn from(report: SchemaAdherenceReport) -> Self {
        Self::SchemaAdherence(report)
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.1}% of {}", self.kind(), self.rate() * 100.0, self.total())?;
        if let Self::SchemaAdherence(r) = self {
            for (tag, count) in &r.error_taxonomy {
                write!(f, "\n  {}: {}", tag, count)?;
            }
        }
        Ok(())
    }
}

/// Schema verdict for one record, as written to a verdict dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseVerdict {
    /// Record id.
    pub id: String,
    /// Whether the record passed.
    pub passed: bool,
    /// `"ok"` or the failure tag.
    pub error_tag: String,
}

impl CaseVerdict {
    /// Create a case verdict.
    pub fn new(id: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            id: id.into(),
            passed: verdict.passed(),
            error_tag: verdict.tag().to_string(),
        }
    }
}

/// Everything one evaluation run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationRun {
    /// One report per selected metric, in [`MetricKind::ALL`] order.
    pub reports: Vec<MetricsReport>,
    /// Per-record schema verdicts (empty unless schema adherence ran).
    pub verdicts: Vec<CaseVerdict>,
}

impl EvaluationRun {
    /// Find the report for a metric.
    pub fn report(&self, kind: MetricKind) -> Option<&MetricsReport> {
        self.reports.iter().find(|r| r.kind() == kind)
    }

    /// Text written to a report file.
    ///
    /// A single report is written as-is; several are nested under their
    /// metric names.
    pub fn to_json(&self) -> EvalResult<String> {
        if let [only] = self.reports.as_slice() {
            return only.to_json();
        }
        let mut combined = Map::new();
        for report in &self.reports {
            combined.insert(report.kind().as_str().to_string(), report.to_value()?);
        }
        Ok(serde_json::to_string_pretty(&sort_keys(&JsonValue::Object(
            combined,
        )))?)
    }

    /// Print every report to `stdout` and, if given, write the file copy.
    pub fn emit(&self, stdout: &mut impl Write, out: Option<&Path>) -> EvalResult<()> {
        for report in &self.reports {
            writeln!(stdout, "{}", report.to_json()?)?;
        }
        if let Some(path) = out {
            write_file(path, &self.to_json()?)?;
            tracing::info!(path = %path.display(), "wrote metrics report");
        }
        Ok(())
    }
}

/// Print a report to standard output and optionally duplicate it to `out`.
pub fn write_report(report: &MetricsReport, out: Option<&Path>) -> EvalResult<()> {
    let text = report.to_json()?;
    println!("{}", text);
    if let Some(path) = out {
        write_file(path, &text)?;
    }
    Ok(())
}

fn write_file(path: &Path, text: &str) -> EvalResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}
