//! Evaluation runner.

use crate::config::EvalConfig;
use crate::dataset::PredictionSet;
use crate::error::EvalResult;
use crate::evaluator::MetricKind;
use crate::report::{CaseVerdict, EvaluationRun};
use crate::schema_check::check_record;
use callcheck_core::{write_jsonl, DecodeMode};
use std::time::Instant;

/// Runs the selected metrics over a prediction set.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalRunner {
    metrics: Vec<MetricKind>,
    decode: DecodeMode,
    collect_verdicts: bool,
}

impl Default for EvalRunner {
    fn default() -> Self {
        Self {
            metrics: MetricKind::ALL.to_vec(),
            decode: DecodeMode::Strict,
            collect_verdicts: false,
        }
    }
}

impl EvalRunner {
    /// Create a runner computing every metric.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute only these metrics.
    pub fn metrics(mut self, metrics: impl IntoIterator<Item = MetricKind>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    /// Set the decode mode.
    pub fn decode(mut self, mode: DecodeMode) -> Self {
        self.decode = mode;
        self
    }

    /// Also produce per-record schema verdicts.
    pub fn collect_verdicts(mut self) -> Self {
        self.collect_verdicts = true;
        self
    }

    /// Build a runner from a config.
    pub fn from_config(config: &EvalConfig) -> Self {
        let runner = Self::new().metrics(config.metrics.iter().copied()).decode(config.decode);
        if config.verdicts.is_some() {
            runner.collect_verdicts()
        } else {
            runner
        }
    }

    /// Evaluate a prediction set.
    ///
    /// Reports come back in `json_validity`, `exact_match`,
    /// `schema_adherence` order whatever order the metrics were given in.
    pub fn run(&self, set: &PredictionSet) -> EvaluationRun {
        let start = Instant::now();
        let set = set.clone().redecode(self.decode);
        let records = set.records();

        let reports = MetricKind::ALL
            .into_iter()
            .filter(|m| self.metrics.contains(m))
            .map(|metric| {
                let report = metric.evaluate(records);
                tracing::info!(
                    %metric,
                    total = report.total(),
                    rate = report.rate(),
                    "metric computed"
                );
                report
            })
            .collect();

        let verdicts = if self.collect_verdicts {
            records
                .iter()
                .map(|r| CaseVerdict::new(r.id.clone(), check_record(r)))
                .collect()
        } else {
            Vec::new()
        };

        tracing::debug!(
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "evaluation finished"
        );
        EvaluationRun { reports, verdicts }
    }

    /// Load, evaluate and write everything a config asks for.
    ///
    /// Reports are printed to stdout; the report file and verdict dump are
    /// written when configured.
    pub fn run_config(config: &EvalConfig) -> EvalResult<EvaluationRun> {
        config.validate()?;
        let set = PredictionSet::load(&config.predictions)?;
        let run = Self::from_config(config).run(&set);

        run.emit(&mut std::io::stdout().lock(), config.output.as_deref())?;
        if let Some(path) = &config.verdicts {
            write_jsonl(path, &run.verdicts)?;
            tracing::info!(path = %path.display(), verdicts = run.verdicts.len(), "wrote verdicts");
        }
        Ok(run)
    }
}
