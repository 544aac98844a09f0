//! Run configuration.
//!
//! An [`EvalConfig`] names the predictions file, the metrics to compute and
//! where to write results. It can be built in code or loaded from a YAML or
//! JSON file:
//!
//! ```yaml
//! predictions: runs/baseline/preds.jsonl
//! output: runs/baseline/metrics.json
//! metrics: [schema_adherence]
//! decode: lenient
//! ```

use crate::error::{EvalError, EvalResult};
use crate::evaluator::MetricKind;
use callcheck_core::DecodeMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// JSONL predictions file.
    pub predictions: PathBuf,
    /// Where to duplicate the report, besides stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Metrics to compute.
    #[serde(default = "default_metrics")]
    pub metrics: Vec<MetricKind>,
    /// How to treat raw model text.
    #[serde(default)]
    pub decode: DecodeMode,
    /// Where to dump per-record schema verdicts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdicts: Option<PathBuf>,
}

fn default_metrics() -> Vec<MetricKind> {
    MetricKind::ALL.to_vec()
}

impl EvalConfig {
    /// Create a config computing every metric over `predictions`.
    pub fn new(predictions: impl Into<PathBuf>) -> Self {
        Self {
            predictions: predictions.into(),
            output: None,
            metrics: default_metrics(),
            decode: DecodeMode::default(),
            verdicts: None,
        }
    }

    /// Set the report file.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Compute only the given metrics.
    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = MetricKind>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    /// Compute a single metric.
    pub fn with_metric(self, metric: MetricKind) -> Self {
        self.with_metrics([metric])
    }

    /// Set the decode mode.
    pub fn with_decode(mut self, mode: DecodeMode) -> Self {
        self.decode = mode;
        self
    }

    /// Set the verdict dump file.
    pub fn with_verdicts(mut self, path: impl Into<PathBuf>) -> Self {
        self.verdicts = Some(path.into());
        self
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                return Err(EvalError::config(format!(
                    "{}: expected a .yaml, .yml or .json file",
                    path.display()
                )))
            }
        };
        tracing::debug!(path = %path.display(), metrics = config.metrics.len(), "loaded config");
        Ok(config)
    }

    /// Parse YAML.
    pub fn from_yaml_str(content: &str) -> EvalResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON.
    pub fn from_json_str(content: &str) -> EvalResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> EvalResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the config is usable.
    pub fn validate(&self) -> EvalResult<()> {
        if self.predictions.as_os_str().is_empty() {
            return Err(EvalError::config("predictions path is empty"));
        }
        if self.metrics.is_empty() {
            return Err(EvalError::config("no metrics selected"));
        }
        Ok(())
    }

    /// Selected metrics in report order, without duplicates.
    pub fn ordered_metrics(&self) -> Vec<MetricKind> {
        MetricKind::ALL
            .into_iter()
            .filter(|m| self.metrics.contains(m))
            .collect()
    }
}
