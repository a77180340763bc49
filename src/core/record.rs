//! JSON Lines record I/O
//!
//! Both the technical and the production pipeline exchange BOM snapshots as
//! newline-delimited JSON. Readers tolerate byte-order marks and blank
//! lines; writers emit one compact object per line so that identical inputs
//! always produce byte-identical snapshots.

use std::io::BufRead;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

/// A single flat BOM record as emitted by the CAD tool.
///
/// The field set is open-ended - whatever the tool echoed ends up here, plus
/// the caller-injected `product`/`version` tags. Key order is preserved.
pub type BomRecord = Map<String, Value>;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Read newline-delimited JSON records from a reader.
///
/// Leading byte-order marks are stripped per line and blank lines are
/// skipped; any remaining line must be a complete JSON value.
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<Value>, RecordError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| RecordError::Io {
            path: "<stream>".to_string(),
            source,
        })?;
        let line = line.trim_start_matches('\u{feff}').trim();
        if line.is_empty() {
            continue;
        }
        let value =
            serde_json::from_str(line).map_err(|source| RecordError::Json { line: idx + 1, source })?;
        records.push(value);
    }
    Ok(records)
}

/// Read newline-delimited JSON records from a file.
pub fn read_jsonl_path(path: &Path) -> Result<Vec<Value>, RecordError> {
    let content = std::fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_jsonl(content.as_bytes())
}

/// Render records as JSON Lines text, one compact object per line.
pub fn to_jsonl(records: &[BomRecord]) -> String {
    let mut out = String::new();
    for record in records {
        // Map-to-string serialization cannot fail; keys are strings.
        out.push_str(&Value::Object(record.clone()).to_string());
        out.push('\n');
    }
    out
}
