//! Lookup table commands: generate, preview

use super::util::{load_session, parse_format_arg, parse_output_arg, write_output, Format};
use lookupgen::Result;

pub fn cmd_generate(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(
            "Usage: lookupgen generate <config.json> [--format csv|json] [--output file]".into(),
        );
    }

    let session = load_session(&args[0])?;
    let format = parse_format_arg(args)?;
    let output = parse_output_arg(args);

    let table = session.lookup_table();
    let content = match format {
        Format::Csv => table.to_csv(),
        Format::Json => table.to_json()?,
    };
    tracing::info!(rows = table.len(), ?format, "generated lookup table");

    write_output(&output, &content)
}

pub fn cmd_preview(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err("Usage: lookupgen preview <config.json>".into());
    }

    let session = load_session(&args[0])?;
    if session.parameters().is_empty() {
        println!("No parameters defined");
        return Ok(());
    }

    let candidates = session.candidate_combinations().len();
    let table = session.lookup_table();
    println!("{}", table.to_text());
    println!();
    println!(
        "{} of {} combinations valid ({} applied rule(s))",
        table.len(),
        candidates,
        session.rules().iter().filter(|r| r.is_applied()).count()
    );
    Ok(())
}
