//! lookupgen CLI - Command-line interface
//!
//! Commands:
//!   generate - Write the filtered lookup table (CSV or JSON)
//!   preview  - Print the filtered lookup table as aligned text
//!   rules    - Show the status of every mapping rule
//!   schema   - Print JSON schemas
//!   version  - Print the version

mod cli;

use lookupgen::VERSION;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "generate" => cli::cmd_generate(&args[2..]),
        "preview" => cli::cmd_preview(&args[2..]),
        "rules" => cli::cmd_rules(&args[2..]),
        "schema" => cli::cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("lookupgen {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only)
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lookupgen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_usage() {
    println!(
        r#"
lookupgen - Parameter combination lookup tables

USAGE:
    lookupgen <COMMAND> [OPTIONS]

COMMANDS:
    generate <config.json>           Write the filtered lookup table
    preview <config.json>            Print the filtered lookup table as text
    rules <config.json>              Show the status of every mapping rule
    schema [name]                    Print JSON schema (config, table)
    version                          Print version

OPTIONS:
    --format <csv|json>              Table format for generate (default: csv)
    --output <file>                  Output file (default: stdout)
    --json                           JSON output (rules)

ENVIRONMENT:
    RUST_LOG                         Log filter, e.g. lookupgen=debug

EXAMPLES:
    lookupgen generate revit-lookup-config-2024-05-01.json -o revit-lookup-table.csv
    lookupgen generate config.json --format json
    lookupgen preview config.json
    lookupgen rules config.json --json
"#
    );
}
