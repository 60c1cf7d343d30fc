use std::path::PathBuf;

use thiserror::Error;

/// Structural problems with the dataset's columns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("required columns missing: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("no year columns found (expected at least one all-digit column name)")]
    NoYearColumns,
}

/// Fatal start-up errors raised while loading the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed JSON dataset: {0}")]
    JsonShape(String),
}
