//! The `callcheck` command line.
//!
//! ```text
//! callcheck eval   --pred P [--out O] [--metric json|em|schema|all] [--config C] [--lenient] [--verdicts V]
//! callcheck filter --input I --output O [--validate-targets]
//! callcheck stress --input I --out-dir D
//! callcheck split  --input I --train-out T --dev-out D [--train-ratio R] [--seed S]
//! ```
//!
//! Metrics reports go to stdout; logs go to stderr.

use anyhow::Context;
use callcheck_core::{read_jsonl, write_jsonl, DecodeMode};
use callcheck_data::{
    filter_file, split_train_dev, write_stress_suite, FilterOptions, Row, DEFAULT_SEED,
    DEFAULT_TRAIN_RATIO,
};
use callcheck_evals::{EvalConfig, EvalRunner, MetricKind};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use thiserror::Error;

/// Usage text.
pub const USAGE: &str = r#"callcheck - validate and score language-model tool calls

USAGE:
    callcheck <COMMAND> [OPTIONS]

COMMANDS:
    eval      Compute metrics over a predictions JSONL file
                --pred <path>          predictions file
                --out <path>           also write the report here
                --metric <name>        json | em | schema | all (default: all)
                --config <path>        YAML or JSON run config; flags override it
                --lenient              re-decode raw outputs, recovering fenced JSON
                --verdicts <path>      write per-record schema verdicts as JSONL
    filter    Keep unambiguous training examples
                --input <path> --output <path> [--validate-targets]
    stress    Write schema/instruction perturbation suites
                --input <path> --out-dir <dir>
    split     Seeded train/dev split
                --input <path> --train-out <path> --dev-out <path>
                [--train-ratio <f64>] [--seed <u64>]
    help      Show this message

ENVIRONMENT:
    RUST_LOG                  log filter (default: warn)"#;

/// Command-line parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// No command given.
    #[error("missing command")]
    MissingCommand,

    /// Unknown command.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Flag not accepted by the command.
    #[error("unknown option '{0}'")]
    UnknownFlag(String),

    /// Flag given without its value.
    #[error("option '{0}' needs a value")]
    MissingValue(String),

    /// Required flag absent.
    #[error("missing required option '--{0}'")]
    MissingRequired(&'static str),

    /// Flag value could not be parsed.
    #[error("invalid value for '--{flag}': {message}")]
    InvalidValue {
        /// Flag name.
        flag: &'static str,
        /// What was wrong.
        message: String,
    },

    /// Stray positional argument.
    #[error("unexpected argument '{0}'")]
    Unexpected(String),
}

/// Metric selection from `--metric`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSelection {
    /// Every metric.
    All,
    /// One metric.
    One(MetricKind),
}

impl MetricSelection {
    fn parse(value: &str) -> Result<Self, CliError> {
        if value == "all" {
            return Ok(Self::All);
        }
        value
            .parse()
            .map(Self::One)
            .map_err(|message| CliError::InvalidValue {
                flag: "metric",
                message,
            })
    }

    /// Metrics selected.
    pub fn metrics(&self) -> Vec<MetricKind> {
        match self {
            Self::All => MetricKind::ALL.to_vec(),
            Self::One(metric) => vec![*metric],
        }
    }
}

/// Options for `callcheck eval`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalArgs {
    /// `--pred`
    pub pred: Option<PathBuf>,
    /// `--out`
    pub out: Option<PathBuf>,
    /// `--metric`
    pub metric: Option<MetricSelection>,
    /// `--config`
    pub config: Option<PathBuf>,
    /// `--lenient`
    pub lenient: bool,
    /// `--verdicts`
    pub verdicts: Option<PathBuf>,
}

impl EvalArgs {
    /// Merge flags over the config file (if any) into a run config.
    pub fn to_config(&self) -> anyhow::Result<EvalConfig> {
        let mut config = match (&self.config, &self.pred) {
            (Some(path), _) => EvalConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            (None, Some(pred)) => EvalConfig::new(pred),
            (None, None) => return Err(CliError::MissingRequired("pred").into()),
        };
        if let Some(pred) = &self.pred {
            config.predictions = pred.clone();
        }
        if let Some(out) = &self.out {
            config.output = Some(out.clone());
        }
        if let Some(metric) = self.metric {
            config.metrics = metric.metrics();
        }
        if self.lenient {
            config.decode = DecodeMode::Lenient;
        }
        if let Some(verdicts) = &self.verdicts {
            config.verdicts = Some(verdicts.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

/// Options for `callcheck filter`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArgs {
    /// `--input`
    pub input: PathBuf,
    /// `--output`
    pub output: PathBuf,
    /// `--validate-targets`
    pub validate_targets: bool,
}

/// Options for `callcheck stress`.
#[derive(Debug, Clone, PartialEq)]
pub struct StressArgs {
    /// `--input`
    pub input: PathBuf,
    /// `--out-dir`
    pub out_dir: PathBuf,
}

/// Options for `callcheck split`.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitArgs {
    /// `--input`
    pub input: PathBuf,
    /// `--train-out`
    pub train_out: PathBuf,
    /// `--dev-out`
    pub dev_out: PathBuf,
    /// `--train-ratio`
    pub train_ratio: f64,
    /// `--seed`
    pub seed: u64,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Compute metrics.
    Eval(EvalArgs),
    /// Filter raw rows.
    Filter(FilterArgs),
    /// Build stress suites.
    Stress(StressArgs),
    /// Train/dev split.
    Split(SplitArgs),
    /// Print usage.
    Help,
}

/// Flags of one command: `--name value`, `--name=value` or bare switches.
struct Flags {
    values: HashMap<&'static str, String>,
    switches: HashSet<&'static str>,
}

impl Flags {
    fn parse(
        args: &[String],
        valued: &[&'static str],
        switches: &[&'static str],
    ) -> Result<Self, CliError> {
        let mut flags = Self {
            values: HashMap::new(),
            switches: HashSet::new(),
        };
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let Some(body) = arg.strip_prefix("--") else {
                return Err(CliError::Unexpected(arg.clone()));
            };
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (body, None),
            };
            if let Some(&flag) = switches.iter().find(|s| **s == name) {
                flags.switches.insert(flag);
            } else if let Some(&flag) = valued.iter().find(|v| **v == name) {
                let value = match inline {
                    Some(value) => value,
                    None => iter
                        .next()
                        .cloned()
                        .ok_or_else(|| CliError::MissingValue(arg.clone()))?,
                };
                flags.values.insert(flag, value);
            } else {
                return Err(CliError::UnknownFlag(arg.clone()));
            }
        }
        Ok(flags)
    }

    fn path(&self, name: &'static str) -> Option<PathBuf> {
        self.values.get(name).map(PathBuf::from)
    }

    fn required_path(&self, name: &'static str) -> Result<PathBuf, CliError> {
        self.path(name).ok_or(CliError::MissingRequired(name))
    }

    fn switch(&self, name: &'static str) -> bool {
        self.switches.contains(name)
    }

    fn parsed<T: std::str::FromStr>(&self, name: &'static str, default: T) -> Result<T, CliError>
    where
        T::Err: std::fmt::Display,
    {
        match self.values.get(name) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|e: T::Err| CliError::InvalidValue {
                flag: name,
                message: format!("'{}': {}", raw, e),
            }),
        }
    }
}

/// Parse arguments (without the program name).
pub fn parse(args: &[String]) -> Result<Command, CliError> {
    let (command, rest) = args.split_first().ok_or(CliError::MissingCommand)?;
    match command.as_str() {
        "eval" => {
            let flags = Flags::parse(
                rest,
                &["pred", "out", "metric", "config", "verdicts"],
                &["lenient"],
            )?;
            Ok(Command::Eval(EvalArgs {
                pred: flags.path("pred"),
                out: flags.path("out"),
                metric: flags
                    .values
                    .get("metric")
                    .map(|m| MetricSelection::parse(m))
                    .transpose()?,
                config: flags.path("config"),
                lenient: flags.switch("lenient"),
                verdicts: flags.path("verdicts"),
            }))
        }
        "filter" => {
            let flags = Flags::parse(rest, &["input", "output"], &["validate-targets"])?;
            Ok(Command::Filter(FilterArgs {
                input: flags.required_path("input")?,
                output: flags.required_path("output")?,
                validate_targets: flags.switch("validate-targets"),
            }))
        }
        "stress" => {
            let flags = Flags::parse(rest, &["input", "out-dir"], &[])?;
            Ok(Command::Stress(StressArgs {
                input: flags.required_path("input")?,
                out_dir: flags.required_path("out-dir")?,
            }))
        }
        "split" => {
            let flags = Flags::parse(
                rest,
                &["input", "train-out", "dev-out", "train-ratio", "seed"],
                &[],
            )?;
            Ok(Command::Split(SplitArgs {
                input: flags.required_path("input")?,
                train_out: flags.required_path("train-out")?,
                dev_out: flags.required_path("dev-out")?,
                train_ratio: flags.parsed("train-ratio", DEFAULT_TRAIN_RATIO)?,
                seed: flags.parsed("seed", DEFAULT_SEED)?,
            }))
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(CliError::UnknownCommand(other.to_string())),
    }
}

/// Run a parsed command.
pub fn run(command: Command) -> anyhow::Result<()> {
    tracing::debug!(?command, "running command");
    match command {
        Command::Eval(args) => {
            let config = args.to_config()?;
            EvalRunner::run_config(&config)
                .with_context(|| format!("evaluating {}", config.predictions.display()))?;
        }
        Command::Filter(args) => {
            let options = FilterOptions {
                validate_targets: args.validate_targets,
            };
            let outcome = filter_file(&args.input, &args.output, options)
                .with_context(|| format!("filtering {}", args.input.display()))?;
            println!(
                "Wrote {} unambiguous examples to {}. Dropped {}.",
                outcome.kept.len(),
                args.output.display(),
                outcome.dropped
            );
            for (reason, count) in &outcome.drop_reasons {
                println!("  {}: {}", reason, count);
            }
        }
        Command::Stress(args) => {
            let rows: Vec<Row> = read_jsonl(&args.input)
                .with_context(|| format!("reading {}", args.input.display()))?;
            write_stress_suite(&rows, &args.out_dir)
                .with_context(|| format!("writing stress suite to {}", args.out_dir.display()))?;
            println!("Wrote stress test files to {}", args.out_dir.display());
        }
        Command::Split(args) => {
            let rows: Vec<JsonValue> = read_jsonl(&args.input)
                .with_context(|| format!("reading {}", args.input.display()))?;
            let split = split_train_dev(rows, args.train_ratio, args.seed)?;
            write_jsonl(&args.train_out, &split.train)
                .with_context(|| format!("writing {}", args.train_out.display()))?;
            write_jsonl(&args.dev_out, &split.dev)
                .with_context(|| format!("writing {}", args.dev_out.display()))?;
            println!(
                "Wrote {} train and {} dev examples.",
                split.train.len(),
                split.dev.len()
            );
        }
        Command::Help => println!("{}", USAGE),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_eval() {
        let command = parse(&args("eval --pred p.jsonl --metric em --lenient --out=m.json")).unwrap();
        assert_eq!(
            command,
            Command::Eval(EvalArgs {
                pred: Some("p.jsonl".into()),
                out: Some("m.json".into()),
                metric: Some(MetricSelection::One(MetricKind::ExactMatch)),
                lenient: true,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_parse_split_defaults() {
        let Command::Split(split) =
            parse(&args("split --input a --train-out t --dev-out d")).unwrap()
        else {
            panic!("expected split");
        };
        assert_eq!(split.train_ratio, DEFAULT_TRAIN_RATIO);
        assert_eq!(split.seed, DEFAULT_SEED);
    }

    #[rstest]
    #[case("", CliError::MissingCommand)]
    #[case("grade", CliError::UnknownCommand("grade".into()))]
    #[case("eval --pred", CliError::MissingValue("--pred".into()))]
    #[case("eval --verbose", CliError::UnknownFlag("--verbose".into()))]
    #[case("eval p.jsonl", CliError::Unexpected("p.jsonl".into()))]
    #[case("filter --input a", CliError::MissingRequired("output"))]
    #[case("stress --out-dir d", CliError::MissingRequired("input"))]
    fn test_parse_errors(#[case] line: &str, #[case] expected: CliError) {
        assert_eq!(parse(&args(line)), Err(expected));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            parse(&args("eval --pred p --metric bleu")),
            Err(CliError::InvalidValue { flag: "metric", .. })
        ));
        assert!(matches!(
            parse(&args("split --input a --train-out t --dev-out d --seed x")),
            Err(CliError::InvalidValue { flag: "seed", .. })
        ));
    }

    #[test]
    fn test_eval_flags_override_config() {
        let dir = std::env::temp_dir().join(format!("callcheck-cli-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let config_path = dir.join("run.yaml");
        std::fs::write(&config_path, "predictions: a.jsonl\nmetrics: [exact_match]\n").unwrap();

        let args = EvalArgs {
            pred: Some("b.jsonl".into()),
            config: Some(config_path),
            metric: Some(MetricSelection::All),
            lenient: true,
            ..Default::default()
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.predictions, PathBuf::from("b.jsonl"));
        assert_eq!(config.metrics, MetricKind::ALL.to_vec());
        assert_eq!(config.decode, DecodeMode::Lenient);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_eval_requires_pred_or_config() {
        assert!(EvalArgs::default().to_config().is_err());
    }
}
