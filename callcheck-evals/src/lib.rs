//! # callcheck-evals
//!
//! Schema adherence checking and batch metrics for language-model tool calls.
//!
//! ## Core Concepts
//!
//! - **[`check_call`] / [`check_record`]**: validate one call, yielding a [`Verdict`]
//! - **[`ErrorTag`]**: the closed failure taxonomy
//! - **[`MetricKind`]**: JSON validity, exact match, schema adherence
//! - **[`PredictionSet`]**: a batch of [`PredictionRecord`](callcheck_core::PredictionRecord)s
//! - **[`EvalRunner`]**: computes the selected metrics into an [`EvaluationRun`]
//! - **[`EvalConfig`]**: file-loadable run configuration
//!
//! ## Example
//!
//! ```rust
//! use callcheck_evals::{check_call, ErrorTag, Verdict};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "name": "get_weather",
//!     "parameters": {
//!         "properties": {"city": {"type": "string"}},
//!         "required": ["city"]
//!     }
//! });
//! let call = json!({"name": "get_weather", "arguments": {"city": "Paris", "unit": "C"}});
//!
//! let verdict = check_call(Some(&call), Some(&schema), None);
//! assert_eq!(verdict, Verdict::Fail(ErrorTag::UnknownArgument));
//! ```
//!
//! ## Batch Evaluation
//!
//! ```rust
//! use callcheck_evals::{EvalRunner, MetricKind, PredictionSet};
//!
//! let set = PredictionSet::from_jsonl_str(
//!     r#"{"id": "1", "parsed_output": {"name": "ping", "arguments": {}}, "target_call": {"name": "ping", "arguments": {}}}"#,
//! ).unwrap();
//!
//! let run = EvalRunner::new().metrics([MetricKind::ExactMatch]).run(&set);
//! assert_eq!(run.reports[0].rate(), 1.0);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod schema_check;
pub mod taxonomy;

// Re-exports
pub use config::EvalConfig;
pub use dataset::PredictionSet;
pub use error::{EvalError, EvalResult};
pub use evaluator::MetricKind;
pub use metrics::{
    rate, ExactMatch, ExactMatchReport, JsonValidityReport, SchemaAdherenceReport,
};
pub use report::{write_report, CaseVerdict, EvaluationRun, MetricsReport};
pub use runner::EvalRunner;
pub use schema_check::{check_call, check_record};
pub use taxonomy::{ErrorTag, Verdict, OK_TAG};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        check_call, check_record, EvalConfig, EvalError, EvalResult, EvalRunner, EvaluationRun,
        ErrorTag, MetricKind, MetricsReport, PredictionSet, Verdict,
    };
}
