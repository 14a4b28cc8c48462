mod config;
mod csv;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use baza_core::error::BazaError;
use baza_core::interpreter::Outcome;
use baza_core::{execute, sql, Database};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use config::Config;

/// `baza`: run a `.sql` script against CSV-seeded tables, or open an
/// interactive REPL.
#[derive(Parser)]
#[command(name = "baza", version, about)]
struct Cli {
    /// Path to a TOML config file providing defaults for --tables/--delimiter.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity; repeat for more detail.
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbosity: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load CSV-seeded tables and run a `.sql` script against them.
    Run {
        /// Directory of `*.csv` files, one table per file.
        #[arg(long)]
        tables: Option<PathBuf>,
        /// `.sql` script of semicolon-terminated statements.
        #[arg(long)]
        script: PathBuf,
        /// Field delimiter used by the CSV files.
        #[arg(long)]
        delimiter: Option<char>,
    },
    /// Load CSV-seeded tables and open an interactive prompt.
    Repl {
        #[arg(long)]
        tables: Option<PathBuf>,
        #[arg(long)]
        delimiter: Option<char>,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("baza_cli={level},baza_core={level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_tables(db: &mut Database, dir: Option<&std::path::Path>, delimiter: char) -> Result<()> {
    let Some(dir) = dir else {
        return Ok(());
    };
    let entries = std::fs::read_dir(dir).with_context(|| format!("reading tables directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let table_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow::anyhow!("{}: cannot derive a table name from this path", path.display()))?
            .to_string();
        info!(table = %table_name, path = %path.display(), "loading table from CSV");
        csv::load_table(db, &path, delimiter, &table_name)?;
    }
    Ok(())
}

/// Is this error category fatal to the driver? Per the error-handling
/// policy: only allocation failure and internal invariant violations abort
/// the run outright; everything else is reported and execution continues
/// with the next statement.
fn is_fatal(err: &BazaError) -> bool {
    matches!(err, BazaError::Alloc | BazaError::ServerError(_))
}

/// Execute one statement, printing its outcome. Returns `Err` only for
/// fatal error categories.
fn run_statement(db: &mut Database, text: &str) -> std::result::Result<(), BazaError> {
    let query = match sql::parse(text) {
        Ok(query) => query,
        Err(err) => {
            warn!(statement = %text, error = %err, "statement rejected");
            println!("ERROR: {err}");
            return Ok(());
        }
    };

    match execute(db, query) {
        Ok(Outcome::Ok) => println!("OK"),
        Ok(Outcome::Rows(rows)) => {
            for row in rows {
                println!("{row}");
            }
        }
        Err(err) if is_fatal(&err) => {
            error!(error = %err, "fatal error, aborting run");
            return Err(err);
        }
        Err(err) => {
            warn!(statement = %text, error = %err, "statement failed");
            println!("ERROR: {err}");
        }
    }
    Ok(())
}

fn run(tables: Option<PathBuf>, script: PathBuf, delimiter: char) -> Result<()> {
    let mut db = Database::new();
    load_tables(&mut db, tables.as_deref(), delimiter)?;

    let statements = script::read_statements(&script)?;
    for statement in statements {
        if let Err(fatal) = run_statement(&mut db, &statement) {
            anyhow::bail!("fatal error: {fatal}");
        }
    }
    Ok(())
}

fn repl(tables: Option<PathBuf>, delimiter: char) -> Result<()> {
    let mut db = Database::new();
    load_tables(&mut db, tables.as_deref(), delimiter)?;

    let mut editor = rustyline::DefaultEditor::new().context("initializing the line editor")?;
    loop {
        match editor.readline("baza> ") {
            Ok(line) => {
                let statement = line.trim().trim_end_matches(';').trim();
                if statement.is_empty() {
                    continue;
                }
                if statement.eq_ignore_ascii_case("quit") || statement.eq_ignore_ascii_case("exit") {
                    break;
                }
                let _ = editor.add_history_entry(line.as_str());
                if let Err(fatal) = run_statement(&mut db, statement) {
                    println!("fatal error: {fatal}");
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Eof | rustyline::error::ReadlineError::Interrupted) => break,
            Err(err) => {
                error!(error = %err, "line editor error");
                break;
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    let outcome = match cli.command {
        Command::Run {
            tables,
            script,
            delimiter,
        } => {
            let cfg = match Config::load(cli.config.as_deref(), tables, delimiter) {
                Ok(cfg) => cfg,
                Err(err) => {
                    eprintln!("error: {err:#}");
                    return ExitCode::FAILURE;
                }
            };
            run(cfg.tables_dir, script, cfg.delimiter)
        }
        Command::Repl { tables, delimiter } => {
            let cfg = match Config::load(cli.config.as_deref(), tables, delimiter) {
                Ok(cfg) => cfg,
                Err(err) => {
                    eprintln!("error: {err:#}");
                    return ExitCode::FAILURE;
                }
            };
            repl(cfg.tables_dir, cfg.delimiter)
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
