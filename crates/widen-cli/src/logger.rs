//! Stderr logging for the CLI, driven by `-v`.

use std::io::Write;

use colored::Colorize;
use log::{Level, LevelFilter};

/// Map the `-v` count to a level filter.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. Later calls keep the first level.
pub fn init(verbose: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .format(|buf, record| {
            let tag = match record.level() {
                Level::Error => "error".red().bold(),
                Level::Warn => "warn".yellow().bold(),
                Level::Info => "info".cyan(),
                Level::Debug => "debug".dimmed(),
                Level::Trace => "trace".dimmed(),
            };
            writeln!(buf, "{} {}", tag, record.args())
        })
        .try_init();
}
