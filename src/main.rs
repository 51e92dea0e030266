//! Reactive API Transformer - Command-line tool generating a future/callback client API.
//!
//! Reads a reflected description of a reactive-streams client API, classifies
//! every type reachable from the configured seed classes and writes the
//! target API sources, the conversion utilities and two dependency graph
//! exports.
//!
//! # Usage
//!
//! ```bash
//! reactive-api-transformer [OPTIONS] -c <CONFIG> -o <OUT_DIR> <MODEL_DIR>
//! ```
//!
//! # Examples
//!
//! Generate sources:
//! ```bash
//! reactive-api-transformer ./api-dump -c generator.yaml -o src/main/generated
//! ```
//!
//! Also write a JSON classification report:
//! ```bash
//! reactive-api-transformer ./api-dump -c generator.yaml -o out -r report.json -f json
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! reactive-api-transformer ./api-dump -c generator.yaml -o out -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use reactive_api_transformer::cli;

fn main() -> Result<()> {
    // Parse once to read the verbose flag before the logger exists, validate after
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Reactive API Transformer starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    info!("API generation completed successfully");

    Ok(())
}
