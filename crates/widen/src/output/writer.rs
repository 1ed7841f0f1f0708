//! Table writer for TSV, CSV and JSON.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{Result, WidenError};
use crate::table::Table;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
    Json,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "tsv" | "tab" | "txt" => Some(OutputFormat::Tsv),
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Writer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

/// Writes tables without reordering columns or altering values.
///
/// Delimited formats render [`crate::Value::Missing`] as an empty field.
/// JSON is an array of objects whose keys follow column order, with missing
/// cells as `null`.
pub struct Writer {
    config: WriterConfig,
}

impl Writer {
    /// Create a writer for the given format.
    pub fn new(format: OutputFormat) -> Self {
        Self::with_config(WriterConfig {
            format,
            ..WriterConfig::default()
        })
    }

    /// Create a writer with custom configuration.
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Write `table` to any sink.
    pub fn write<W: Write>(&self, table: &Table, sink: W) -> Result<()> {
        match self.config.format {
            OutputFormat::Tsv => write_delimited(table, sink, b'\t'),
            OutputFormat::Csv => write_delimited(table, sink, b','),
            OutputFormat::Json => self.write_json(table, sink),
        }
    }

    /// Write `table` to a file, creating parent directories as needed.
    pub fn write_file(&self, table: &Table, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| WidenError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| WidenError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.write(table, BufWriter::new(file))
    }

    /// Render `table` to a string.
    pub fn render(&self, table: &Table) -> Result<String> {
        let mut buf = Vec::new();
        self.write(table, &mut buf)?;
        String::from_utf8(buf).map_err(|e| WidenError::Config(format!("Output is not UTF-8: {}", e)))
    }

    fn write_json<W: Write>(&self, table: &Table, sink: W) -> Result<()> {
        let records: Vec<Map<String, JsonValue>> = table
            .rows()
            .map(|row| {
                row.iter()
                    .map(|(name, value)| serde_json::to_value(value).map(|v| (name.to_string(), v)))
                    .collect::<std::result::Result<Map<_, _>, serde_json::Error>>()
            })
            .collect::<std::result::Result<_, _>>()?;

        if self.config.pretty {
            serde_json::to_writer_pretty(sink, &records)?;
        } else {
            serde_json::to_writer(sink, &records)?;
        }
        Ok(())
    }
}

fn write_delimited<W: Write>(table: &Table, sink: W, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(sink);

    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|(_, value)| value.to_string()))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
