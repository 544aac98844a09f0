//! # callcheck-core
//!
//! Core types and pure helpers for scoring language-model tool calls.
//!
//! This crate provides the building blocks shared by every callcheck
//! evaluator:
//!
//! - **JSON types**: [`JsonType`] classification with integer-to-number widening
//! - **Canonical comparison**: key-order-insensitive structural equality
//! - **Schemas**: lenient, borrowed views over authored tool schemas
//! - **Records**: [`PredictionRecord`] and [`ToolCall`]
//! - **Decoding**: strict and lenient decoding of raw model text
//! - **JSONL**: line-delimited record I/O
//!
//! ## Example
//!
//! ```rust
//! use callcheck_core::{canonical_eq, JsonType, ToolCall};
//! use serde_json::json;
//!
//! assert_eq!(JsonType::of(&json!(10)), JsonType::Integer);
//! assert!(JsonType::Integer.satisfies(JsonType::Number));
//!
//! let gold = ToolCall::new("get_weather").with_argument("city", "Paris");
//! assert!(canonical_eq(&gold.to_value(), &json!({"arguments": {"city": "Paris"}, "name": "get_weather"})));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod call;
pub mod canonical;
pub mod decode;
pub mod errors;
pub mod json_type;
pub mod jsonl;
pub mod record;
pub mod schema;

// Re-exports for convenience
pub use call::{ToolCall, CALL_KEYS};
pub use canonical::{canonical_eq, canonical_json, sort_keys};
pub use decode::{decode_output, extract_json, DecodeMode, Decoded};
pub use errors::{CoreError, Result};
pub use json_type::{json_type, JsonType};
pub use jsonl::{parse_jsonl, read_jsonl, to_line, write_jsonl};
pub use record::PredictionRecord;
pub use schema::{ParametersView, PropertiesView, SchemaView, TypeConstraint};
