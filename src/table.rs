//! Loading table data from disk.
//!
//! Two input shapes are accepted:
//! - JSON: `{"headers": [...], "rows": [[...], ...]}`, or a bare array of
//!   arrays whose first entry is the header row. Cells may be any JSON
//!   scalar; they are stringified.
//! - TSV: one row per line, tab-separated, first line is the header.
//!
//! The format is picked from the file extension (`.json` or anything else).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::Document;
use crate::error::PagerError;

/// Header plus body rows, as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of columns (the widest of header and rows).
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Wrap into a headless document with an empty filter and default page size.
    pub fn into_document(self) -> Document {
        Document::new(self.headers, self.rows)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableJson {
    Object { headers: Vec<Value>, rows: Vec<Vec<Value>> },
    Grid(Vec<Vec<Value>>),
}

/// Load a table, choosing the parser from the extension.
///
/// # Errors
/// I/O failures, malformed JSON, or an input with no header row.
pub fn load_table(path: &Path) -> Result<Table, PagerError> {
    let contents = fs::read_to_string(path).map_err(|source| PagerError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let table = if is_json {
        parse_json(&contents, path)?
    } else {
        parse_tsv(&contents, path)?
    };

    tracing::debug!(
        path = %path.display(),
        columns = table.column_count(),
        rows = table.rows.len(),
        "loaded table"
    );
    Ok(table)
}

/// Parse the JSON shapes described in the module docs.
pub fn parse_json(contents: &str, path: &Path) -> Result<Table, PagerError> {
    let parsed: TableJson = serde_json::from_str(contents).map_err(|source| PagerError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match parsed {
        TableJson::Object { headers, rows } => Ok(Table {
            headers: headers.iter().map(cell_text).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(cell_text).collect())
                .collect(),
        }),
        TableJson::Grid(grid) => {
            let mut lines = grid.into_iter();
            let headers = lines
                .next()
                .ok_or_else(|| PagerError::EmptyTable(path.to_path_buf()))?;
            Ok(Table {
                headers: headers.iter().map(cell_text).collect(),
                rows: lines.map(|r| r.iter().map(cell_text).collect()).collect(),
            })
        }
    }
}

/// Parse tab-separated text. Blank lines are skipped.
pub fn parse_tsv(contents: &str, path: &Path) -> Result<Table, PagerError> {
    let mut lines = contents
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty());

    let headers = lines
        .next()
        .ok_or_else(|| PagerError::EmptyTable(path.to_path_buf()))?;

    Ok(Table {
        headers: split_tsv(headers),
        rows: lines.map(split_tsv).collect(),
    })
}

fn split_tsv(line: &str) -> Vec<String> {
    line.split('\t').map(str::to_string).collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
