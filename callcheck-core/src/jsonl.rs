//! Line-delimited JSON reading and writing.
//!
//! Each non-blank line is one independently decodable JSON value. Written
//! lines use sorted keys so that files diff cleanly between runs.

use crate::canonical::sort_keys;
use crate::errors::{CoreError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read every record from a JSONL file.
pub fn read_jsonl<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = serde_json::from_str(line).map_err(|e| CoreError::json_line(path, idx + 1, e))?;
        rows.push(row);
    }

    tracing::debug!(path = %path.display(), records = rows.len(), "read JSONL");
    Ok(rows)
}

/// Parse JSONL content held in memory. `origin` only labels errors.
pub fn parse_jsonl<T: DeserializeOwned>(content: &str, origin: impl AsRef<Path>) -> Result<Vec<T>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line.trim())
                .map_err(|e| CoreError::json_line(origin.as_ref(), idx + 1, e))
        })
        .collect()
}

/// Encode one record as a compact, key-sorted JSON line (without newline).
pub fn to_line<T: Serialize>(row: &T) -> Result<String> {
    let value = serde_json::to_value(row)?;
    Ok(sort_keys(&value).to_string())
}

/// Write records to a JSONL file, creating parent directories as needed.
pub fn write_jsonl<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for row in rows {
        writer.write_all(to_line(row)?.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), records = rows.len(), "wrote JSONL");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value as JsonValue};

    #[test]
    fn test_parse_skips_blank_lines() {
        let content = "{\"a\":1}\n\n   \n{\"a\":2}\n";
        let rows: Vec<JsonValue> = parse_jsonl(content, "mem").unwrap();
        assert_eq!(rows, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let content = "{\"a\":1}\n\n{\"a\":\n";
        let err = parse_jsonl::<JsonValue>(content, "mem.jsonl").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_to_line_sorts_keys() {
        let line = to_line(&json!({"b": 1, "a": {"d": 2, "c": 3}})).unwrap();
        assert_eq!(line, r#"{"a":{"c":3,"d":2},"b":1}"#);
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = std::env::temp_dir().join(format!("callcheck-jsonl-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("rows.jsonl");
        let rows = vec![json!({"id": "a"}), json!({"id": "b"})];

        write_jsonl(&path, &rows).unwrap();
        let loaded: Vec<JsonValue> = read_jsonl(&path).unwrap();
        assert_eq!(loaded, rows);

        std::fs::remove_dir_all(dir).unwrap();
    }
}
