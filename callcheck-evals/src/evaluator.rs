//! Metric selection and dispatch.
//!
//! The three metrics share a record type but no code path: [`MetricKind`]
//! is the tagged variant that routes a batch to the matching reduction.

use crate::metrics::{ExactMatchReport, JsonValidityReport, SchemaAdherenceReport};
use crate::report::MetricsReport;
use callcheck_core::PredictionRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which metric to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Share of outputs that decoded as JSON.
    JsonValidity,
    /// Share of compared outputs identical to the gold call.
    ExactMatch,
    /// Share of outputs obeying the tool schema.
    SchemaAdherence,
}

impl MetricKind {
    /// All metrics, in report order.
    pub const ALL: [MetricKind; 3] = [Self::JsonValidity, Self::ExactMatch, Self::SchemaAdherence];

    /// Metric name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JsonValidity => "json_validity",
            Self::ExactMatch => "exact_match",
            Self::SchemaAdherence => "schema_adherence",
        }
    }

    /// Run this metric over a batch.
    pub fn evaluate(&self, records: &[PredictionRecord]) -> MetricsReport {
        match self {
            Self::JsonValidity => JsonValidityReport::from_records(records).into(),
            Self::ExactMatch => ExactMatchReport::from_records(records).into(),
            Self::SchemaAdherence => SchemaAdherenceReport::from_records(records).into(),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    /// Accepts the metric name or its short form (`json`, `em`, `schema`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json_validity" | "json" => Ok(Self::JsonValidity),
            "exact_match" | "em" => Ok(Self::ExactMatch),
            "schema_adherence" | "schema" => Ok(Self::SchemaAdherence),
            other => Err(format!("unknown metric '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("json", MetricKind::JsonValidity)]
    #[case("json_validity", MetricKind::JsonValidity)]
    #[case("em", MetricKind::ExactMatch)]
    #[case("exact_match", MetricKind::ExactMatch)]
    #[case("schema", MetricKind::SchemaAdherence)]
    #[case("schema_adherence", MetricKind::SchemaAdherence)]
    fn test_parse(#[case] name: &str, #[case] expected: MetricKind) {
        assert_eq!(name.parse::<MetricKind>(), Ok(expected));
    }

    #[test]
    fn test_parse_unknown() {
        assert!("bleu".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_dispatch_matches_kind() {
        let records = vec![PredictionRecord::new("a", json!({"name": "f", "arguments": {}}))];
        for kind in MetricKind::ALL {
            let report = kind.evaluate(&records);
            assert_eq!(report.kind(), kind);
            assert_eq!(report.total(), if kind == MetricKind::ExactMatch { 0 } else { 1 });
        }
    }
}
