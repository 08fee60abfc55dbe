//! Loading records from JSON sources.
//!
//! Two formats are supported: a JSON array of objects, and JSON lines (one
//! object per line). The schema is inferred from the records' keys in order
//! of first appearance.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use griddle_core::error::{Error, SourceError};
use griddle_core::{JsonRecord, Result};

use crate::MemRepository;

fn map_io(err: std::io::Error) -> Error {
    Error::Source(SourceError::Io {
        message: err.to_string(),
    })
}

fn map_decode(err: serde_json::Error) -> Error {
    Error::Source(SourceError::Decode {
        message: err.to_string(),
    })
}

/// Parse a JSON array of objects into records.
pub fn records_from_json(content: &str) -> Result<Vec<JsonRecord>> {
    let value: Value = serde_json::from_str(content).map_err(map_decode)?;
    let items = value.as_array().ok_or_else(|| {
        Error::Source(SourceError::Decode {
            message: "expected a JSON array of objects".to_string(),
        })
    })?;
    items.iter().cloned().map(JsonRecord::new).collect()
}

/// Parse JSON lines (one object per line, blank lines skipped) into records.
pub fn records_from_jsonl(content: &str) -> Result<Vec<JsonRecord>> {
    let mut records = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(map_decode)?;
        records.push(JsonRecord::new(value)?);
    }
    Ok(records)
}

/// Infer a schema from the records' keys, in order of first appearance.
pub fn infer_schema(records: &[JsonRecord]) -> Vec<String> {
    let mut schema: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !schema.iter().any(|k| k == key) {
                schema.push(key.to_string());
            }
        }
    }
    schema
}

impl MemRepository<JsonRecord> {
    /// Load a repository from a JSON or JSON-lines file.
    ///
    /// Files ending in `.jsonl` or `.ndjson` are read line-per-record;
    /// anything else must be a JSON array of objects. The schema is inferred
    /// from the data.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(map_io)?;

        let line_per_record = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson")
            });

        let records = if line_per_record {
            records_from_jsonl(&content)?
        } else {
            records_from_json(&content)?
        };

        let schema = infer_schema(&records);
        debug!(
            path = %path.display(),
            records = records.len(),
            fields = schema.len(),
            "loaded records"
        );

        Ok(MemRepository::new(schema, records))
    }
}
