//! Inspect command - preview the columns each spec would generate.

use std::path::PathBuf;

use colored::Colorize;
use widen::Widener;

use crate::cli::SpecArgs;

pub fn run(file: PathBuf, specs: SpecArgs, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Data file not found: {}", file.display()).into());
    }

    let config = super::build_config(&specs)?;
    let widener = Widener::with_config(config);
    let (source, plans) = widener.inspect(&file)?;

    if json_output {
        let status = serde_json::json!({
            "file": source.file,
            "rows": source.row_count,
            "columns": source.column_count,
            "plans": plans,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns, {})",
        "File:".bold(),
        source.file.cyan(),
        source.row_count,
        source.column_count,
        source.format
    );
    println!();

    for (spec, plan) in widener.config().specs.iter().zip(&plans) {
        println!(
            "{} split on {}",
            plan.source_column.white().bold(),
            spec.delimiter.to_string().yellow()
        );
        println!("  max selections: {}", plan.max_selections.to_string().green());
        let columns: Vec<&str> = plan.new_columns().collect();
        if columns.is_empty() {
            println!("  new columns:    {}", "(none)".dimmed());
        } else {
            println!("  new columns:    {}", columns.join(", "));
        }
        if !spec.remove_source {
            println!("  source column:  {}", "kept".dimmed());
        }
    }

    Ok(())
}
