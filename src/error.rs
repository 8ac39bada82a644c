//! Error type shared by the library modules.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PagerError {
    /// Rows-per-page input was not a positive integer.
    #[error("invalid page size: {0:?} (expected a positive integer)")]
    InvalidPageSize(String),

    /// A `data-page` value that is neither a number nor a sentinel.
    #[error("invalid page reference: {0:?}")]
    InvalidPageRef(String),

    #[error("failed to read table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid table JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The input parsed but held no header row.
    #[error("table {0} has no header row")]
    EmptyTable(PathBuf),

    #[error("failed to render markup: {0}")]
    Render(#[from] askama::Error),
}
