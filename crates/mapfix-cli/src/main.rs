//! MapFixer CLI
//!
//! Watches the game log for script dumps, writes them into the output
//! folders, and regenerates the dispatcher switch.

mod cli;
mod context;
mod error;
mod status;

use clap::Parser;
use colored::Colorize;
use mapfix_blocks::split_log_lines;
use mapfix_core::{
    FsLogSource, LogSource, LogWatcher, RuntimeConfig, StatusSink, SystemClock, process_lines,
};
use mapfix_fs::LogOpen;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::{CliError, Result};
use status::ConsoleStatus;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));

    init_tracing(cli.verbose)?;

    let cwd = std::env::current_dir()?;
    let config = context::resolve(&cli, &cwd)?;
    tracing::debug!(
        root = %config.layout.root().display(),
        log = %config.log_path().display(),
        outputs = ?config.output_folders,
        "resolved configuration"
    );

    let source = FsLogSource::new(config.log_path());
    let mut console = ConsoleStatus::stdout(config.verbose);

    if cli.once {
        return run_once(&config, &source, &mut console);
    }

    let mut watcher = LogWatcher::new(config, source, SystemClock);
    if !watcher.prime()? {
        tracing::info!("log is held by the game; waiting for it to be released");
    }
    watcher.run(&mut console)
}

fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::user(format!("Failed to set up logging: {e}")))?;

    tracing::debug!("Verbose mode enabled");
    Ok(())
}

/// Process the whole log in one pass.
fn run_once(
    config: &RuntimeConfig,
    source: &FsLogSource,
    console: &mut impl StatusSink,
) -> Result<()> {
    let text = match source.read()? {
        LogOpen::Readable(text) => text,
        LogOpen::Locked => {
            return Err(CliError::user(format!(
                "{} is held by the game; quit the game and retry",
                source.path().display()
            )));
        }
    };

    let lines = split_log_lines(&text);
    let report = process_lines(config, &lines, 0)?;
    if report.is_empty() {
        println!("No script dumps found in {}", source.path().display());
    } else {
        console.pass_completed(&report);
    }
    Ok(())
}
