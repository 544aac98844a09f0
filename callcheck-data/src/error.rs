//! Dataset preparation errors.

use callcheck_core::CoreError;
use thiserror::Error;

/// Errors that can occur while preparing datasets.
#[derive(Debug, Error)]
pub enum DataError {
    /// Not enough rows to split into two non-empty parts.
    #[error("Need at least 2 rows to create a train/dev split, found {found}")]
    TooFewRows {
        /// Rows available.
        found: usize,
    },

    /// Error reading or writing JSONL.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataError {
    /// Create a too-few-rows error.
    pub fn too_few_rows(found: usize) -> Self {
        Self::TooFewRows { found }
    }
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DataError>;
