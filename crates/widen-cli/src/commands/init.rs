//! Init-config command - write a sample configuration file.

use std::path::PathBuf;

use colored::Colorize;
use widen::{Delimiter, MultiValueFieldSpec, WidenConfig};

/// A configuration showing every option.
pub fn sample_config() -> WidenConfig {
    WidenConfig {
        specs: vec![
            MultiValueFieldSpec::new("colours", Delimiter::literal(",")).with_count(),
            MultiValueFieldSpec::new("pets", Delimiter::any_of([",", " ", "-"])).keep_source(),
            MultiValueFieldSpec::new("scores", Delimiter::regex(r"[;|]\s*")).convert_numeric(),
        ],
        ..WidenConfig::default()
    }
}

pub fn run(path: PathBuf, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )
        .into());
    }

    sample_config().save(&path)?;

    println!(
        "{} sample configuration to {}",
        "Wrote".cyan().bold(),
        path.display().to_string().cyan()
    );
    println!(
        "Edit the specs, then run {}",
        format!("widen expand <FILE> --config {}", path.display()).cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_delimiters_compile() {
        for spec in sample_config().specs {
            assert!(spec.delimiter.compile(&spec.source_column).is_ok());
        }
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widen.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(run(path.clone(), false).is_err());
        assert!(run(path.clone(), true).is_ok());
        assert_eq!(WidenConfig::load(&path).unwrap(), sample_config());
    }
}
