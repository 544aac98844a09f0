//! Command-line flows over files on disk.

#![cfg(feature = "cli")]

use callcheck::cli::{self, Command};
use callcheck_core::{read_jsonl, write_jsonl};
use pretty_assertions::assert_eq;
use serde_json::{json, Value as JsonValue};
use std::path::PathBuf;

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("callcheck-cli-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path).unwrap();
        Self(path)
    }

    fn path(&self, name: &str) -> String {
        self.0.join(name).display().to_string()
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn command(line: &str) -> Command {
    let args: Vec<String> = line.split_whitespace().map(String::from).collect();
    cli::parse(&args).unwrap()
}

#[test]
fn test_eval_writes_single_metric_report() {
    let dir = TempDir::new();
    let gold = json!({"name": "ping", "arguments": {"host": "a"}});
    let rows = vec![
        json!({"id": "1", "parsed_output": gold, "target_call": gold}),
        json!({"id": "2", "parsed_output": null, "error": "Expecting value", "target_call": gold}),
    ];
    write_jsonl(dir.path("preds.jsonl"), &rows).unwrap();

    cli::run(command(&format!(
        "eval --pred {} --metric em --out {}",
        dir.path("preds.jsonl"),
        dir.path("metrics.json")
    )))
    .unwrap();

    let report: JsonValue =
        serde_json::from_str(&std::fs::read_to_string(dir.path("metrics.json")).unwrap()).unwrap();
    assert_eq!(
        report,
        json!({"exact_match_rate": 1.0, "matches": 1, "skipped": 1, "total": 1})
    );
}

#[test]
fn test_eval_all_metrics_nests_file_report() {
    let dir = TempDir::new();
    let gold = json!({"name": "ping", "arguments": {}});
    write_jsonl(
        dir.path("preds.jsonl"),
        &[json!({"id": "1", "parsed_output": gold, "target_call": gold})],
    )
    .unwrap();

    cli::run(command(&format!(
        "eval --pred {} --out {} --verdicts {}",
        dir.path("preds.jsonl"),
        dir.path("metrics.json"),
        dir.path("verdicts.jsonl")
    )))
    .unwrap();

    let report: JsonValue =
        serde_json::from_str(&std::fs::read_to_string(dir.path("metrics.json")).unwrap()).unwrap();
    assert_eq!(report["json_validity"]["json_validity_rate"], 1.0);
    assert_eq!(report["schema_adherence"]["passes"], 1);

    let verdicts: Vec<JsonValue> = read_jsonl(dir.path("verdicts.jsonl")).unwrap();
    assert_eq!(verdicts, vec![json!({"error_tag": "ok", "id": "1", "passed": true})]);
}

#[test]
fn test_filter_then_split() {
    let dir = TempDir::new();
    let rows: Vec<JsonValue> = (0..10)
        .map(|i| {
            json!({
                "instruction": format!("Ping host {i}"),
                "tool_schema": {"name": "ping", "parameters": {"properties": {"host": {"type": "string"}}}},
                "target_call": {"name": "ping", "arguments": {"host": format!("h{i}")}},
                "ambiguous": i == 9
            })
        })
        .collect();
    write_jsonl(dir.path("raw.jsonl"), &rows).unwrap();

    cli::run(command(&format!(
        "filter --input {} --output {} --validate-targets",
        dir.path("raw.jsonl"),
        dir.path("all.jsonl")
    )))
    .unwrap();
    let kept: Vec<JsonValue> = read_jsonl(dir.path("all.jsonl")).unwrap();
    assert_eq!(kept.len(), 9);

    cli::run(command(&format!(
        "split --input {} --train-out {} --dev-out {} --train-ratio 0.5",
        dir.path("all.jsonl"),
        dir.path("train.jsonl"),
        dir.path("dev.jsonl")
    )))
    .unwrap();
    let train: Vec<JsonValue> = read_jsonl(dir.path("train.jsonl")).unwrap();
    let dev: Vec<JsonValue> = read_jsonl(dir.path("dev.jsonl")).unwrap();
    assert_eq!((train.len(), dev.len()), (4, 5));
}

#[test]
fn test_stress_writes_every_mode() {
    let dir = TempDir::new();
    write_jsonl(
        dir.path("all.jsonl"),
        &[json!({"id": "a", "instruction": "x", "tool_schema": {"name": "ping"}})],
    )
    .unwrap();

    cli::run(command(&format!(
        "stress --input {} --out-dir {}",
        dir.path("all.jsonl"),
        dir.path("stress")
    )))
    .unwrap();

    for mode in ["rename_params", "reorder", "unseen_tool", "underspecified_instruction"] {
        let rows: Vec<JsonValue> = read_jsonl(dir.path(&format!("stress/{mode}.jsonl"))).unwrap();
        assert_eq!(rows.len(), 1);
    }
}

#[test]
fn test_split_needs_two_rows() {
    let dir = TempDir::new();
    write_jsonl(dir.path("one.jsonl"), &[json!({"id": "a"})]).unwrap();
    let err = cli::run(command(&format!(
        "split --input {} --train-out {} --dev-out {}",
        dir.path("one.jsonl"),
        dir.path("t.jsonl"),
        dir.path("d.jsonl")
    )))
    .unwrap_err();
    assert!(err.to_string().contains("at least 2 rows"));
}
