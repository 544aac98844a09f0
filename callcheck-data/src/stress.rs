//! Stress-test suites built by perturbing schemas and instructions.
//!
//! Each [`PerturbationMode`] yields a copy of the input rows with one kind of
//! distribution shift applied. All other row keys are carried over as-is.

use crate::error::Result;
use crate::example::{text_of, Row};
use callcheck_core::write_jsonl;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Instruction used by [`PerturbationMode::UnderspecifiedInstruction`].
pub const UNDERSPECIFIED_INSTRUCTION: &str = "Do the task.";

/// One kind of perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerturbationMode {
    /// Append `_new` to every parameter name.
    RenameParams,
    /// No semantic change; the control set.
    Reorder,
    /// Append `_unseen` to the tool name.
    UnseenTool,
    /// Replace the instruction with a vague one.
    UnderspecifiedInstruction,
}

impl PerturbationMode {
    /// All modes, in suite order.
    pub const ALL: [PerturbationMode; 4] = [
        Self::RenameParams,
        Self::Reorder,
        Self::UnseenTool,
        Self::UnderspecifiedInstruction,
    ];

    /// Mode name, also the suite file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RenameParams => "rename_params",
            Self::Reorder => "reorder",
            Self::UnseenTool => "unseen_tool",
            Self::UnderspecifiedInstruction => "underspecified_instruction",
        }
    }

    /// Whether this mode rewrites the tool schema.
    pub fn touches_schema(&self) -> bool {
        !matches!(self, Self::UnderspecifiedInstruction)
    }
}

impl fmt::Display for PerturbationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerturbationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown perturbation mode '{}'", s))
    }
}

/// Apply a perturbation to a tool schema.
///
/// Non-mapping schemas come back unchanged.
pub fn perturb_schema(schema: &JsonValue, mode: PerturbationMode) -> JsonValue {
    let JsonValue::Object(schema) = schema else {
        return schema.clone();
    };
    let mut out = schema.clone();

    match mode {
        PerturbationMode::RenameParams => {
            if let Some(JsonValue::Object(params)) = out.get_mut("parameters") {
                rename_params(params);
            }
        }
        PerturbationMode::UnseenTool => {
            let name = out.get("name").map(text_of).unwrap_or_else(|| "tool".into());
            out.insert("name".into(), JsonValue::String(format!("{name}_unseen")));
        }
        PerturbationMode::Reorder | PerturbationMode::UnderspecifiedInstruction => {}
    }

    JsonValue::Object(out)
}

fn rename_params(params: &mut Map<String, JsonValue>) {
    let Some(JsonValue::Object(props)) = params.get("properties") else {
        return;
    };
    if props.is_empty() {
        return;
    }
    let renamed: Map<String, JsonValue> = props
        .iter()
        .map(|(key, value)| (format!("{key}_new"), value.clone()))
        .collect();
    params.insert("properties".into(), JsonValue::Object(renamed));

    if let Some(JsonValue::Array(required)) = params.get_mut("required") {
        for entry in required.iter_mut() {
            *entry = JsonValue::String(format!("{}_new", text_of(entry)));
        }
    }
}

/// Apply a perturbation to a whole row.
///
/// Schema modes treat a missing `tool_schema` as `{}`.
pub fn perturb_row(row: &Row, mode: PerturbationMode) -> Row {
    let mut out = row.clone();
    if mode.touches_schema() {
        let schema = row
            .get("tool_schema")
            .cloned()
            .unwrap_or_else(|| JsonValue::Object(Map::new()));
        out.insert("tool_schema".into(), perturb_schema(&schema, mode));
    } else {
        out.insert(
            "instruction".into(),
            JsonValue::String(UNDERSPECIFIED_INSTRUCTION.into()),
        );
    }
    out
}

/// Perturbed copies of a dataset, one per mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StressSuite {
    sets: Vec<(PerturbationMode, Vec<Row>)>,
}

impl StressSuite {
    /// Rows for one mode.
    pub fn get(&self, mode: PerturbationMode) -> Option<&[Row]> {
        self.sets
            .iter()
            .find(|(m, _)| *m == mode)
            .map(|(_, rows)| rows.as_slice())
    }

    /// Iterate over `(mode, rows)` in suite order.
    pub fn iter(&self) -> impl Iterator<Item = (PerturbationMode, &[Row])> {
        self.sets.iter().map(|(m, rows)| (*m, rows.as_slice()))
    }

    /// Number of modes.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Write `<mode>.jsonl` per mode into `dir`, returning the paths written.
    pub fn write(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::with_capacity(self.sets.len());
        for (mode, rows) in &self.sets {
            let path = dir.join(format!("{mode}.jsonl"));
            write_jsonl(&path, rows)?;
            written.push(path);
        }
        tracing::info!(dir = %dir.display(), files = written.len(), "wrote stress suite");
        Ok(written)
    }
}

/// Build the full stress suite for a dataset.
pub fn build_stress_suite(rows: &[Row]) -> StressSuite {
    let sets = PerturbationMode::ALL
        .into_iter()
        .map(|mode| (mode, rows.iter().map(|row| perturb_row(row, mode)).collect()))
        .collect();
    tracing::debug!(rows = rows.len(), modes = PerturbationMode::ALL.len(), "built stress suite");
    StressSuite { sets }
}

/// Build the stress suite and write it into `dir`.
pub fn write_stress_suite(rows: &[Row], dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    build_stress_suite(rows).write(dir)
}
