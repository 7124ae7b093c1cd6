use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use dentaku_cli::{CliConfig, TapeLoader, logging, session};
use dentaku_core::Calculator;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Four-function key-by-key calculator.
///
/// Keys are `0-9 . + - * / = c`. Operators apply strictly left to right,
/// one step behind their entry.
#[derive(Debug, Parser)]
#[command(name = "dentaku", version, about)]
struct Cli {
    /// TOML config file with an optional `[engine]` section.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (e.g. `debug` or `warn,dentaku_core=trace`). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log records to this file as well as stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Press each character of KEYS and print the display.
    Keys {
        /// Keys to press, e.g. `4*2+1=`.
        #[arg(allow_hyphen_values = true)]
        keys: String,

        /// Print the display after every key.
        #[arg(long)]
        trace: bool,
    },

    /// Read key lines from stdin, printing the display after each line.
    Repl,

    /// Replay a `key,expected` CSV tape and report mismatches.
    Tape {
        /// Path to the tape CSV file.
        #[arg(short, long)]
        file: PathBuf,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = CliConfig::load_or_default(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    let mut calc = Calculator::with_config(config.engine).context("Invalid engine configuration")?;
    debug!(error_marker = %calc.config().error_marker, "calculator ready");

    match cli.command {
        Command::Keys { keys, trace } => session::run_keys(&mut calc, &keys, trace, io::stdout()),
        Command::Repl => {
            let fed = session::run_repl(&mut calc, io::stdin().lock(), io::stdout())?;
            debug!(lines = fed, "repl finished");
            Ok(())
        }
        Command::Tape { file } => replay_tape(&mut calc, &file),
    }
}

fn replay_tape(
    calc: &mut Calculator,
    path: &Path,
) -> Result<()> {
    info!("replaying tape {}", path.display());

    let file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let records = TapeLoader::parse(file)
        .with_context(|| format!("Failed to parse tape: {}", path.display()))?;

    let report = TapeLoader::replay(calc, &records);

    for mismatch in &report.mismatches {
        println!(
            "step {}: key '{}' expected '{}' but display was '{}'",
            mismatch.step, mismatch.key, mismatch.expected, mismatch.actual
        );
    }
    println!(
        "{} keys, {} checked, {} mismatched, final display {}",
        report.steps,
        report.checked,
        report.mismatches.len(),
        report.final_display
    );

    if !report.passed() {
        anyhow::bail!(
            "{} of {} checked steps did not match",
            report.mismatches.len(),
            report.checked
        );
    }
    Ok(())
}
