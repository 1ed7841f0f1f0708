//! CLI command implementations.

pub mod expand;
pub mod init;
pub mod inspect;

use widen::{MultiValueFieldSpec, NumericMode, WidenConfig};

use crate::cli::SpecArgs;

/// Build the run configuration from a config file and/or inline specs.
///
/// Inline `--split` specs are appended after the config file's specs, so
/// they see the columns the file's specs generate.
pub fn build_config(args: &SpecArgs) -> Result<WidenConfig, Box<dyn std::error::Error>> {
    let mut config = match args.config {
        Some(ref path) => WidenConfig::load(path)?,
        None => WidenConfig::default(),
    };

    if let Some(delimiter) = args.delimiter {
        config.parser.delimiter = Some(delimiter);
    }
    if args.no_header {
        config.parser.has_header = false;
    }

    for split in &args.splits {
        let mut spec = MultiValueFieldSpec::new(split.column.clone(), split.delimiter.clone());
        spec.remove_source = !args.keep_source;
        spec.emit_count = args.count;
        if args.numeric {
            spec.numeric = NumericMode::Convert;
        }
        config.specs.push(spec);
    }

    if config.specs.is_empty() {
        return Err("No columns to widen. Pass --split COLUMN=DELIM or --config FILE.".into());
    }

    Ok(config)
}
