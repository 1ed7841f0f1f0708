//! Widen CLI - split multi-response columns into one column per selection.

mod cli;
mod commands;
mod logger;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let result = match cli.command {
        Commands::Expand {
            file,
            specs,
            output,
            format,
            pretty,
            summary,
        } => commands::expand::run(file, specs, output, format, pretty, summary),

        Commands::Inspect { file, specs, json } => commands::inspect::run(file, specs, json),

        Commands::InitConfig { path, force } => commands::init::run(path, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
