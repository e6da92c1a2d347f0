//! CLI utility helpers

use lookupgen::{Configuration, Error, Result, Session};
use std::fs;
use std::path::{Path, PathBuf};

/// Table output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

/// Parse --format argument (default: csv)
pub fn parse_format_arg(args: &[String]) -> Result<Format> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--format" || arg == "-f" {
            return match args.get(i + 1).map(|s| s.to_lowercase()).as_deref() {
                Some("csv") => Ok(Format::Csv),
                Some("json") => Ok(Format::Json),
                Some(other) => Err(format!("Unknown format: {}", other).into()),
                None => Err("--format needs a value (csv|json)".into()),
            };
        }
    }
    Ok(Format::Csv)
}

/// Parse --output argument to determine output file path
pub fn parse_output_arg(args: &[String]) -> Option<PathBuf> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--output" || arg == "-o" {
            if let Some(path) = args.get(i + 1) {
                return Some(PathBuf::from(path));
            }
        }
    }
    None
}

/// Write content to file or stdout
pub fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content).map_err(Error::Io)?;
            eprintln!("Written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

/// Load a configuration file into a fresh session
pub fn load_session(path: &str) -> Result<Session> {
    let config = Configuration::load(Path::new(path))?;
    let mut session = Session::new();
    session.import_configuration(config);
    Ok(session)
}
