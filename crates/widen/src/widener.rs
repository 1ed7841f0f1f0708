//! Main Widener struct and public API.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WidenError};
use crate::expand::{ColumnExpander, ExpansionPlan, ExpansionReport, MultiValueFieldSpec};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::output::WriterConfig;
use crate::table::Table;

/// Configuration for a widening run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidenConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Columns to widen, applied in order.
    pub specs: Vec<MultiValueFieldSpec>,
    /// Output configuration.
    pub output: WriterConfig,
}

impl WidenConfig {
    /// Load a configuration from a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use widen::WidenConfig;
    /// let config = WidenConfig::load("survey.widen.json").unwrap();
    /// println!("Specs: {}", config.specs.len());
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| WidenError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            WidenError::Config(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
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

        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// Result of widening a data file.
#[derive(Debug, Clone)]
pub struct WidenOutcome {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The widened table.
    pub table: Table,
    /// One report per spec.
    pub reports: Vec<ExpansionReport>,
}

impl WidenOutcome {
    /// Number of columns added beyond the source file's width.
    pub fn columns_added(&self) -> usize {
        self.reports
            .iter()
            .map(|r| r.plan.new_columns().count())
            .sum()
    }
}

/// Loads a file and widens it according to a [`WidenConfig`].
///
/// # Example
///
/// ```no_run
/// use widen::{Delimiter, MultiValueFieldSpec, WidenConfig, Widener};
///
/// let config = WidenConfig {
///     specs: vec![MultiValueFieldSpec::new("colours", Delimiter::literal(",")).with_count()],
///     ..WidenConfig::default()
/// };
/// let outcome = Widener::with_config(config).run("survey.csv").unwrap();
/// println!("Columns: {}", outcome.table.column_count());
/// ```
pub struct Widener {
    config: WidenConfig,
    parser: Parser,
    expander: ColumnExpander,
}

impl Widener {
    /// Create a widener with default configuration and no specs.
    pub fn new() -> Self {
        Self::with_config(WidenConfig::default())
    }

    /// Create a widener with custom configuration.
    pub fn with_config(config: WidenConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self {
            config,
            parser,
            expander: ColumnExpander::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &WidenConfig {
        &self.config
    }

    /// Load `path` and apply every configured spec.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<WidenOutcome> {
        let (table, source) = self.parser.parse_file(path)?;

        info!(
            "Loaded {} ({} rows, {} columns)",
            source.file, source.row_count, source.column_count
        );

        let result = self.expander.apply(&table, &self.config.specs)?;

        Ok(WidenOutcome {
            source,
            table: result.table,
            reports: result.reports,
        })
    }

    /// Compute the plan of every configured spec without keeping the
    /// widened table.
    ///
    /// Each plan is computed against the table produced by the specs before
    /// it, exactly as [`Widener::run`] would see it.
    pub fn plan(&self, table: &Table) -> Result<Vec<ExpansionPlan>> {
        let result = self.expander.apply(table, &self.config.specs)?;
        Ok(result.reports.into_iter().map(|r| r.plan).collect())
    }

    /// Load `path` and plan every configured spec.
    pub fn inspect(&self, path: impl AsRef<Path>) -> Result<(SourceMetadata, Vec<ExpansionPlan>)> {
        let (table, source) = self.parser.parse_file(path)?;
        let plans = self.plan(&table)?;
        Ok((source, plans))
    }
}

impl Default for Widener {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::Delimiter;

    #[test]
    fn test_config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widen.json");

        let config = WidenConfig {
            specs: vec![
                MultiValueFieldSpec::new("q1", Delimiter::any_of([",", ";"])).with_count(),
            ],
            ..WidenConfig::default()
        };
        config.save(&path).unwrap();

        assert_eq!(WidenConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_config_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = WidenConfig::load(&path).unwrap_err();
        assert!(matches!(err, WidenError::Config(ref m) if m.contains("bad.json")));
    }

    #[test]
    fn test_config_defaults_from_empty_object() {
        let config: WidenConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WidenConfig::default());
    }

    #[test]
    fn test_plan_sees_earlier_specs() {
        let table = Table::from_rows(["a", "b"], vec![vec!["1,2", "x y z"]]).unwrap();
        let widener = Widener::with_config(WidenConfig {
            specs: vec![
                MultiValueFieldSpec::new("a", Delimiter::literal(",")),
                MultiValueFieldSpec::new("b", Delimiter::literal(" ")).with_count(),
            ],
            ..WidenConfig::default()
        });

        let plans = widener.plan(&table).unwrap();
        assert_eq!(plans[0].max_selections, 2);
        assert_eq!(plans[1].max_selections, 3);
        assert_eq!(plans[1].count_column.as_deref(), Some("b_nselected"));
    }

    #[test]
    fn test_plan_reports_failing_index() {
        let table = Table::from_rows(["a"], vec![vec!["1"]]).unwrap();
        let widener = Widener::with_config(WidenConfig {
            specs: vec![
                MultiValueFieldSpec::new("a", Delimiter::literal(",")).keep_source(),
                MultiValueFieldSpec::new("a", Delimiter::literal(",")),
            ],
            ..WidenConfig::default()
        });

        let err = widener.plan(&table).unwrap_err();
        assert!(matches!(err, WidenError::Expansion { index: 1, .. }));
    }
}
