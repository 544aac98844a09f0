//! # callcheck-data
//!
//! Dataset preparation for tool-calling fine-tunes and their evaluation:
//!
//! - **Filtering**: keep unambiguous rows and normalize them into [`Example`]s
//! - **Stress suites**: schema and instruction perturbations for robustness runs
//! - **Splitting**: seeded train/dev splits
//!
//! ## Example
//!
//! ```rust
//! use callcheck_data::{filter_examples, FilterOptions, Row};
//! use serde_json::json;
//!
//! let row: Row = serde_json::from_value(json!({
//!     "instruction": "What's the weather in Paris?",
//!     "tool_schema": {"name": "get_weather", "parameters": {"properties": {"city": {"type": "string"}}}},
//!     "target_call": {"name": "get_weather", "arguments": {"city": "Paris"}}
//! })).unwrap();
//!
//! let outcome = filter_examples([row], FilterOptions::new().validate_targets());
//! assert_eq!(outcome.kept[0].id, "ex-000000");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod example;
pub mod filter;
pub mod split;
pub mod stress;

// Re-exports
pub use error::{DataError, Result};
pub use example::{is_truthy, Example, Row};
pub use filter::{filter_examples, filter_file, is_unambiguous, normalize, FilterOptions, FilterOutcome};
pub use split::{split_index, split_train_dev, Split, DEFAULT_SEED, DEFAULT_TRAIN_RATIO};
pub use stress::{
    build_stress_suite, perturb_row, perturb_schema, write_stress_suite, PerturbationMode,
    StressSuite,
};
