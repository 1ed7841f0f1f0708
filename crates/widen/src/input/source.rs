//! Source file metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about a loaded data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Field delimiter used when reading.
    pub delimiter: char,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        delimiter: u8,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format: format_name(delimiter).to_string(),
            delimiter: delimiter as char,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Name of the format implied by a field delimiter.
pub(crate) fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_file_name_and_format() {
        let meta = SourceMetadata::new(
            PathBuf::from("data/survey.tsv"),
            "sha256:00".to_string(),
            10,
            b'\t',
            3,
            2,
        );
        assert_eq!(meta.file, "survey.tsv");
        assert_eq!(meta.format, "tsv");
        assert_eq!(meta.delimiter, '\t');
    }
}
