//! `quayside` - run WHERE-clause queries against a JSON record file.
//!
//! Run with: cargo run -p quayside-cli -- --data vessels.json "WHERE Z13_STATUS_CODE = 4"
//!
//! Without a query argument the tool starts an interactive loop.

mod format;
mod repl;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;
use quayside::Database;

use crate::format::{Formatter, OutputFormat};

/// Query an in-memory JSON dataset with WHERE clauses
#[derive(Debug, Parser)]
#[command(name = "quayside", version)]
#[command(about = "Query an in-memory JSON dataset with WHERE clauses")]
struct Cli {
    /// JSON array of records, optionally wrapped as `var name = [...];`
    #[arg(short, long, default_value = "Dataset/vessels.json")]
    data: PathBuf,

    /// Default output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Simple)]
    format: OutputFormat,

    /// File written by the json format
    #[arg(short, long, default_value = "results.json")]
    output: PathBuf,

    /// Field shown as the name in the simple format
    #[arg(long, default_value = "Z01_CURRENT_NAME")]
    name_field: String,

    /// Field shown as the type in the simple format
    #[arg(long, default_value = "P36_VESSEL_TYPE")]
    type_field: String,

    /// Run this query once and exit instead of starting the interactive loop
    query: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let db = Database::from_json_file(&cli.data)
        .with_context(|| format!("failed to load {}", cli.data.display()))?;
    let formatter = Formatter::new(cli.name_field, cli.type_field, cli.output);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "\nDatabase loaded with {} records", db.count())?;

    if let Some(clause) = cli.query {
        return match db.query(&clause) {
            Ok(results) => {
                formatter.display(&results, cli.format, &mut out)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Ok(ExitCode::from(2))
            }
        };
    }

    let stdin = io::stdin();
    repl::run(&db, &formatter, cli.format, &mut stdin.lock(), &mut out)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["quayside"]);
        assert_eq!(cli.data, PathBuf::from("Dataset/vessels.json"));
        assert_eq!(cli.format, OutputFormat::Simple);
        assert_eq!(cli.output, PathBuf::from("results.json"));
        assert_eq!(cli.name_field, "Z01_CURRENT_NAME");
        assert!(cli.query.is_none());
    }

    #[test]
    fn one_shot_query_and_format() {
        let cli = Cli::parse_from([
            "quayside",
            "--data",
            "fleet.js",
            "--format",
            "table",
            "WHERE length > 100",
        ]);
        assert_eq!(cli.data, PathBuf::from("fleet.js"));
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.query.as_deref(), Some("WHERE length > 100"));
    }
}
