//! CSV/TSV parser with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::source::SourceMetadata;
use crate::error::{Result, WidenError};
use crate::split::NumericMode;
use crate::table::{Table, Value};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Non-blank lines sampled for detection.
const SAMPLE_LINES: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Field delimiter to use (None = auto-detect).
    pub delimiter: Option<char>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: char,
    /// Numeric interpretation of whole cells.
    pub numeric: NumericMode,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: '"',
            numeric: NumericMode::Off,
        }
    }
}

/// Parses delimited text files into tables.
///
/// Empty fields become [`Value::Missing`]; everything else is text unless
/// numeric conversion is enabled.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| WidenError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| WidenError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = self.resolve_delimiter(&contents)?;
        let table = self.parse_bytes(&contents, delimiter)?;

        debug!(
            "Loaded '{}': {} row(s), {} column(s), delimiter {:?}",
            path.display(),
            table.row_count(),
            table.column_count(),
            delimiter as char
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            delimiter,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse in-memory text.
    pub fn parse_str(&self, text: &str) -> Result<Table> {
        let delimiter = self.resolve_delimiter(text.as_bytes())?;
        self.parse_bytes(text.as_bytes(), delimiter)
    }

    fn resolve_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            Some(c) => ascii_byte(c),
            None => detect_delimiter(bytes, self.config.quote),
        }
    }

    /// Parse bytes with a known delimiter.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(ascii_byte(self.config.quote)?)
            .flexible(true)
            .from_reader(bytes);

        let header_names: Option<Vec<String>> = if self.config.has_header {
            Some(reader.headers()?.iter().map(|s| s.to_string()).collect())
        } else {
            None
        };

        let mut records: Vec<Vec<String>> = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            records.push(record.iter().map(|s| s.to_string()).collect());
        }

        let headers = match header_names {
            Some(names) => names,
            None => match records.first() {
                Some(first) => (0..first.len()).map(|i| format!("column_{}", i + 1)).collect(),
                None => return Err(WidenError::EmptyData("No data rows found".to_string())),
            },
        };

        if headers.is_empty() {
            return Err(WidenError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let numeric = self.config.numeric;
        let rows: Vec<Vec<Value>> = records
            .into_iter()
            .map(|record| {
                let mut row: Vec<Value> = record
                    .iter()
                    .take(expected_cols)
                    .map(|field| cell_value(field, numeric))
                    .collect();
                // Short rows are padded with missing values
                row.resize(expected_cols, Value::Missing);
                row
            })
            .collect();

        Table::from_rows(headers, rows)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a raw field to a cell value.
fn cell_value(field: &str, numeric: NumericMode) -> Value {
    if field.is_empty() {
        Value::Missing
    } else {
        numeric.convert(field)
    }
}

/// Check that a configured delimiter or quote fits in one byte.
fn ascii_byte(c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(WidenError::InvalidDelimiter(format!(
            "{:?} is not a single-byte character",
            c
        )))
    }
}

/// Pick the candidate field separator that splits the sample most evenly.
///
/// Each candidate is ranked by how many sampled lines agree with the first
/// line's field count, then by that count. Tab wins ties. Separators inside
/// `quote`-delimited runs are ignored.
fn detect_delimiter(bytes: &[u8], quote: char) -> Result<u8> {
    let sample: Vec<String> = BufReader::new(bytes)
        .lines()
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    if sample.is_empty() {
        return Err(WidenError::EmptyData("No lines to analyze".to_string()));
    }

    let best = DELIMITERS
        .iter()
        .filter_map(|&candidate| {
            let counts: Vec<usize> = sample
                .iter()
                .map(|line| unquoted_occurrences(line, candidate as char, quote))
                .collect();
            let header = counts[0];
            if header == 0 {
                return None;
            }
            let agreeing = counts.iter().filter(|&&c| c == header).count();
            Some(((agreeing, header, candidate == b'\t'), candidate))
        })
        .max_by_key(|(rank, _)| *rank)
        .map(|(_, candidate)| candidate)
        .unwrap_or(b',');

    debug!("Detected field delimiter {:?}", best as char);
    Ok(best)
}

/// Occurrences of `separator` in `line` outside `quote` runs.
fn unquoted_occurrences(line: &str, separator: char, quote: char) -> usize {
    line.chars()
        .scan(false, |quoted, ch| {
            if ch == quote {
                *quoted = !*quoted;
            }
            Some(!*quoted && ch == separator)
        })
        .filter(|&hit| hit)
        .count()
}
