//! Expand command - widen columns and write the result.

use std::io;
use std::path::PathBuf;

use colored::Colorize;
use widen::{Widener, Writer};

use crate::cli::{OutputFormat, SpecArgs};

pub fn run(
    file: PathBuf,
    specs: SpecArgs,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    pretty: bool,
    summary: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Data file not found: {}", file.display()).into());
    }

    let mut config = super::build_config(&specs)?;

    config.output.format = match (format, output.as_ref()) {
        (Some(f), _) => f.into(),
        (None, Some(path)) => widen::OutputFormat::from_path(path).unwrap_or(config.output.format),
        (None, None) => config.output.format,
    };
    config.output.pretty |= pretty;

    let writer = Writer::with_config(config.output.clone());
    let widener = Widener::with_config(config);

    let outcome = widener.run(&file)?;

    for report in &outcome.reports {
        eprintln!("{} {}", "✓".green(), report.description());
    }

    match output {
        Some(ref path) => {
            writer.write_file(&outcome.table, path)?;
            eprintln!(
                "{} {} rows × {} columns to {}",
                "Wrote".cyan().bold(),
                outcome.table.row_count().to_string().white().bold(),
                outcome.table.column_count().to_string().white().bold(),
                path.display().to_string().cyan()
            );
        }
        None => writer.write(&outcome.table, io::stdout().lock())?,
    }

    if summary {
        let summary = serde_json::json!({
            "file": outcome.source.file,
            "hash": outcome.source.hash,
            "rows": outcome.table.row_count(),
            "columns_before": outcome.source.column_count,
            "columns_after": outcome.table.column_count(),
            "columns_added": outcome.columns_added(),
            "expansions": outcome.reports,
        });
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
