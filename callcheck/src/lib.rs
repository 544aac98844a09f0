//! # callcheck - Tool-Call Validation and Scoring
//!
//! callcheck scores the tool calls a language model produces. Given the
//! model's decoded output, the tool schema the call should obey and the gold
//! call, it decides whether each call is well formed, which single error
//! explains a failure, and how a whole batch does on three metrics:
//!
//! - **JSON validity**: did the output decode at all
//! - **Exact match**: same tool and canonically equal arguments as gold
//! - **Schema adherence**: valid against the declared schema, with an error taxonomy
//!
//! ## Quick Start
//!
//! ```rust
//! use callcheck::prelude::*;
//! use serde_json::json;
//!
//! let record = PredictionRecord::new(
//!     "ex-1",
//!     json!({"name": "get_weather", "arguments": {"city": "Paris"}}),
//! )
//! .with_tool_schema(json!({
//!     "name": "get_weather",
//!     "parameters": {"properties": {"city": {"type": "string"}}, "required": ["city"]}
//! }))
//! .with_parsed_output(json!({"name": "get_weather", "arguments": {"city": 75001}}));
//!
//! assert_eq!(check_record(&record), Verdict::Fail(ErrorTag::WrongArgType));
//!
//! let run = EvalRunner::new().run(&PredictionSet::from_records([record]));
//! assert_eq!(run.reports.len(), 3);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|--------|
//! | `data` | Dataset filtering, stress suites, splitting | ✅ |
//! | `cli` | The `callcheck` binary | ✅ |
//!
//! ## Architecture
//!
//! callcheck is organized as a workspace of focused crates:
//!
//! - [`callcheck_core`] - JSON types, canonical comparison, records, decoding, JSONL
//! - [`callcheck_evals`] - Schema checker, error taxonomy, metrics, reports, runner
//! - `callcheck_data` - Dataset preparation (optional)

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// Crate Re-exports
// ============================================================================

/// Core types and pure helpers.
pub use callcheck_core as core;

/// Checking, metrics and reporting.
pub use callcheck_evals as evals;

/// Dataset preparation.
#[cfg(feature = "data")]
#[cfg_attr(docsrs, doc(cfg(feature = "data")))]
pub use callcheck_data as data;

/// Command-line interface.
#[cfg(feature = "cli")]
#[cfg_attr(docsrs, doc(cfg(feature = "cli")))]
pub mod cli;

// ============================================================================
// Type Re-exports
// ============================================================================

pub use callcheck_core::{
    canonical_eq, canonical_json, decode_output, json_type, CoreError, DecodeMode, JsonType,
    PredictionRecord, ToolCall,
};

pub use callcheck_evals::{
    check_call, check_record, CaseVerdict, ErrorTag, EvalConfig, EvalError, EvalRunner,
    EvaluationRun, MetricKind, MetricsReport, PredictionSet, Verdict,
};

#[cfg(feature = "data")]
#[cfg_attr(docsrs, doc(cfg(feature = "data")))]
pub use callcheck_data::{
    build_stress_suite, filter_examples, split_train_dev, DataError, Example, FilterOptions,
    PerturbationMode,
};

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient prelude for common imports.
///
/// ```ignore
/// use callcheck::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::{canonical_eq, DecodeMode, JsonType, PredictionRecord, ToolCall};

    // Evaluation
    pub use crate::evals::{
        check_call, check_record, ErrorTag, EvalConfig, EvalRunner, EvaluationRun, MetricKind,
        MetricsReport, PredictionSet, Verdict,
    };

    // Dataset preparation
    #[cfg(feature = "data")]
    pub use crate::data::{filter_examples, split_train_dev, FilterOptions, PerturbationMode};
}

/// Returns the current version of callcheck.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(version().split('.').count(), 3);
    }
}
