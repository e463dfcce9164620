//! Interactive query loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use log::error;
use quayside::Database;

use crate::format::{Formatter, OutputFormat};

const EXAMPLE: &str = "WHERE Z13_STATUS_CODE = 4 AND BUILDER_GROUP = 'Guoyu Logistics'";

/// Reads queries from `input` until `quit` or end of input.
///
/// Each successful query is followed by a format prompt; a blank answer
/// picks `default_format`. Malformed queries are reported and the loop
/// continues.
pub fn run<R: BufRead, W: Write>(
    db: &Database,
    formatter: &Formatter,
    default_format: OutputFormat,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        writeln!(out, "\nEnter a query (or 'quit' to exit):")?;
        writeln!(out, "Example: {EXAMPLE}")?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            break;
        };
        let clause = line.trim();
        if clause.is_empty() {
            continue;
        }
        if clause.eq_ignore_ascii_case("quit") {
            break;
        }

        let results = match db.query(clause) {
            Ok(results) => results,
            Err(e) => {
                writeln!(out, "Error: {e}")?;
                continue;
            }
        };

        let format = prompt_format(default_format, input, out)?;
        if let Err(e) = formatter.display(&results, format, out) {
            error!("failed to display results: {e:#}");
            writeln!(out, "An unexpected error occurred. Please try again.")?;
        }
    }
    Ok(())
}

/// Asks for an output format until a valid one (or a blank line) is given.
///
/// End of input falls back to `default_format`.
fn prompt_format<R: BufRead, W: Write>(
    default_format: OutputFormat,
    input: &mut R,
    out: &mut W,
) -> Result<OutputFormat> {
    writeln!(out, "\nAvailable output formats:")?;
    for format in OutputFormat::ALL {
        writeln!(out, "- {format}")?;
    }

    loop {
        write!(out, "Choose format (default: {default_format}): ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(default_format);
        };
        if line.trim().is_empty() {
            return Ok(default_format);
        }
        match OutputFormat::from_name(&line) {
            Some(format) => return Ok(format),
            None => writeln!(out, "Invalid format. Please choose from the available options.")?,
        }
    }
}

/// Reads one line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
