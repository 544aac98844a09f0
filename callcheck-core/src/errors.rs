//! Error types for callcheck-core.
//!
//! Malformed model output is never an error here: it is data that the
//! evaluators classify. These errors cover faults in the surrounding I/O,
//! such as an unreadable file or a JSONL line that does not decode.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing tool-call data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A JSONL line could not be decoded.
    #[error("{path}:{line}: invalid JSON record: {source}")]
    JsonLine {
        /// File being read.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a JSONL line error.
    pub fn json_line(path: impl Into<PathBuf>, line: usize, source: serde_json::Error) -> Self {
        Self::JsonLine {
            path: path.into(),
            line,
            source,
        }
    }

    /// Line number of the offending record, if this is a JSONL decode error.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::JsonLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
