//! Error types for the widen library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for widen operations.
#[derive(Debug, Error)]
pub enum WidenError {
    /// The requested source column is not present in the table.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// A column generated by an expansion already exists in the table.
    #[error("Column '{column}' generated from '{source_column}' already exists")]
    ColumnNameCollision {
        column: String,
        source_column: String,
    },

    /// The expansion request itself is malformed.
    #[error("Invalid spec for '{column}': {message}")]
    InvalidSpec { column: String, message: String },

    /// A spec in a batch failed; earlier specs were applied.
    #[error("Spec #{index} ('{source_column}') failed: {source}")]
    Expansion {
        index: usize,
        source_column: String,
        #[source]
        source: Box<WidenError>,
    },

    /// Two columns with the same name were supplied to a table.
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A row does not have one value per column.
    #[error("Row {row} has {found} value(s), expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A column does not have one value per row.
    #[error("Column '{column}' has {found} value(s), expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid field delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WidenError {
    /// Shorthand for an [`WidenError::InvalidSpec`] on `column`.
    pub(crate) fn invalid_spec(column: &str, message: impl Into<String>) -> Self {
        WidenError::InvalidSpec {
            column: column.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for widen operations.
pub type Result<T> = std::result::Result<T, WidenError>;
