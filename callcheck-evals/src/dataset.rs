//! Prediction sets loaded from JSONL.

use crate::error::{EvalError, EvalResult};
use callcheck_core::{parse_jsonl, read_jsonl, CoreError, DecodeMode, PredictionRecord};
use std::path::{Path, PathBuf};

/// An ordered batch of prediction records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionSet {
    /// Where the records were read from, if from a file.
    pub source: Option<PathBuf>,
    records: Vec<PredictionRecord>,
}

impl PredictionSet {
    /// Wrap records already in memory.
    pub fn from_records(records: impl IntoIterator<Item = PredictionRecord>) -> Self {
        Self {
            source: None,
            records: records.into_iter().collect(),
        }
    }

    /// Load a JSONL predictions file.
    pub fn load(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        let records: Vec<PredictionRecord> = read_jsonl(path).map_err(|e| match e {
            CoreError::Io(io) => {
                EvalError::dataset_load(format!("{}: {}", path.display(), io))
            }
            other => other.into(),
        })?;
        tracing::info!(path = %path.display(), records = records.len(), "loaded predictions");
        Ok(Self {
            source: Some(path.to_path_buf()),
            records,
        })
    }

    /// Parse JSONL content held in memory.
    pub fn from_jsonl_str(content: &str) -> EvalResult<Self> {
        Ok(Self::from_records(parse_jsonl::<PredictionRecord>(content, "<memory>")?))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records.
    pub fn iter(&self) -> std::slice::Iter<'_, PredictionRecord> {
        self.records.iter()
    }

    /// Records as a slice.
    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    /// Recompute every `parsed_output` from raw text with the given mode.
    ///
    /// Strict mode keeps the decoded values as produced upstream.
    pub fn redecode(self, mode: DecodeMode) -> Self {
        if mode == DecodeMode::Strict {
            return self;
        }
        let before = self.records.iter().filter(|r| r.has_parsed_output()).count();
        let records: Vec<_> = self.records.iter().map(|r| r.redecoded(mode)).collect();
        let after = records.iter().filter(|r| r.has_parsed_output()).count();
        tracing::debug!(%mode, before, after, "re-decoded raw outputs");
        Self {
            source: self.source,
            records,
        }
    }

    /// Keep at most the first `n` records.
    pub fn take(mut self, n: usize) -> Self {
        self.records.truncate(n);
        self
    }
}

impl<'a> IntoIterator for &'a PredictionSet {
    type Item = &'a PredictionRecord;
    type IntoIter = std::slice::Iter<'a, PredictionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for PredictionSet {
    type Item = PredictionRecord;
    type IntoIter = std::vec::IntoIter<PredictionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<PredictionRecord> for PredictionSet {
    fn from_iter<I: IntoIterator<Item = PredictionRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
