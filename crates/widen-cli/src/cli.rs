//! CLI argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use widen::Delimiter;

/// Widen: split multi-response columns into one column per selection
#[derive(Parser)]
#[command(name = "widen")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Widen columns of a data file and write the result
    Expand {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        specs: SpecArgs,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: from --output extension, else tsv)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Print a JSON summary of the expansion to stderr
        #[arg(long)]
        summary: bool,
    },

    /// Show the columns each spec would generate without writing anything
    Inspect {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        specs: SpecArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a sample configuration file
    InitConfig {
        /// Where to write the configuration
        #[arg(value_name = "PATH", default_value = "widen.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Options describing which columns to widen.
#[derive(Args, Debug, Clone, Default)]
pub struct SpecArgs {
    /// Configuration file (JSON) with parser options and specs
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Column to widen as COLUMN=DELIM; DELIM is a literal, `any:<chars>`
    /// (each character is a separator) or `re:<regex>`
    #[arg(short, long = "split", value_name = "COLUMN=DELIM", value_parser = parse_split)]
    pub splits: Vec<SplitArg>,

    /// Keep the source columns of --split specs
    #[arg(long)]
    pub keep_source: bool,

    /// Emit a <column>_nselected count column for --split specs
    #[arg(long)]
    pub count: bool,

    /// Convert numeric tokens of --split specs to numbers
    #[arg(long)]
    pub numeric: bool,

    /// Field delimiter of the input file (default: auto-detect)
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Input file has no header row
    #[arg(long)]
    pub no_header: bool,
}

/// A `COLUMN=DELIM` pair from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitArg {
    pub column: String,
    pub delimiter: Delimiter,
}

/// Parse `COLUMN=DELIM`.
pub fn parse_split(s: &str) -> Result<SplitArg, String> {
    let (column, delim) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected COLUMN=DELIM, got '{}'", s))?;

    if column.is_empty() {
        return Err("Column name is empty".to_string());
    }
    if delim.is_empty() {
        return Err(format!("Delimiter for '{}' is empty", column));
    }

    let delimiter = if let Some(pattern) = delim.strip_prefix("re:") {
        Delimiter::regex(pattern)
    } else if let Some(chars) = delim.strip_prefix("any:") {
        Delimiter::any_of(chars.chars().map(String::from))
    } else {
        Delimiter::literal(delim)
    };

    Ok(SplitArg {
        column: column.to_string(),
        delimiter,
    })
}

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use tsv, csv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl From<OutputFormat> for widen::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Tsv => widen::OutputFormat::Tsv,
            OutputFormat::Csv => widen::OutputFormat::Csv,
            OutputFormat::Json => widen::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split_literal() {
        let arg = parse_split("colours=, ").unwrap();
        assert_eq!(arg.column, "colours");
        assert_eq!(arg.delimiter, Delimiter::literal(", "));
    }

    #[test]
    fn test_parse_split_any_of() {
        let arg = parse_split("q1=any:, -").unwrap();
        assert_eq!(arg.delimiter, Delimiter::any_of([",", " ", "-"]));
    }

    #[test]
    fn test_parse_split_regex() {
        let arg = parse_split(r"q1=re:[,;]\s*").unwrap();
        assert_eq!(arg.delimiter, Delimiter::regex(r"[,;]\s*"));
    }

    #[test]
    fn test_parse_split_keeps_equals_in_delimiter() {
        let arg = parse_split("q1==").unwrap();
        assert_eq!(arg.delimiter, Delimiter::literal("="));
    }

    #[test]
    fn test_parse_split_errors() {
        assert!(parse_split("colours").is_err());
        assert!(parse_split("=,").is_err());
        assert!(parse_split("colours=").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "widen", "-vv", "expand", "data.csv", "-s", "q1=,", "--count", "-f", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Expand { specs, format, .. } => {
                assert_eq!(specs.splits.len(), 1);
                assert!(specs.count);
                assert!(matches!(format, Some(OutputFormat::Json)));
            }
            _ => panic!("expected expand"),
        }
    }
}
