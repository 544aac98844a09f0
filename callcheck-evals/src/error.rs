//! Evaluation errors.

use callcheck_core::CoreError;
use thiserror::Error;

/// Errors that can occur while loading, evaluating or reporting.
///
/// A prediction that fails a check is not an error; it is a
/// [`Verdict`](crate::Verdict).
#[derive(Debug, Error)]
pub enum EvalError {
    /// Prediction file could not be loaded.
    #[error("Failed to load predictions: {0}")]
    DatasetLoad(String),

    /// Invalid run configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Error from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Other error.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl EvalError {
    /// Create a dataset load error.
    pub fn dataset_load(msg: impl Into<String>) -> Self {
        Self::DatasetLoad(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_yaml::Error> for EvalError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type for evaluation operations.
pub type EvalResult<T> = Result<T, EvalError>;
