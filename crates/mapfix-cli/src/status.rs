//! Console output for the watcher

use std::io::{self, Write};

use colored::Colorize;
use mapfix_core::{Error, GameState, PassReport, StatusSink};

const RULE: &str = "=======================================";

/// Width cleared before the game state line is redrawn.
const STATE_LINE_WIDTH: usize = 40;

/// Prints game state and extracted records to a terminal-like writer.
pub struct ConsoleStatus<W: Write> {
    out: W,
    verbose: bool,
}

impl ConsoleStatus<io::Stdout> {
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write> ConsoleStatus<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_report(&mut self, report: &PassReport) -> io::Result<()> {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        for record in &report.records {
            writeln!(self.out)?;
            writeln!(self.out, "{RULE}")?;
            writeln!(self.out, "{} ; {}", now.to_string().dimmed(), record.path.as_str().cyan())?;
            if self.verbose {
                write!(self.out, "{}", record.content)?;
            }
            writeln!(self.out, "{RULE}")?;
        }

        for update in &report.dispatchers {
            let status = if update.report.changed {
                "updated".green()
            } else {
                "unchanged".dimmed()
            };
            writeln!(
                self.out,
                "{} {} ({} cases, {})",
                "+".green(),
                update.path.display(),
                update.report.cases.len(),
                status
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> StatusSink for ConsoleStatus<W> {
    fn game_state(&mut self, state: GameState) {
        let message = match state {
            GameState::InGame => "Quit the game...".yellow(),
            GameState::Idle => "Start the game...".green(),
        };
        let blank = " ".repeat(STATE_LINE_WIDTH);
        let result = write!(self.out, "\r{blank}\r{message}").and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::debug!(error = %e, "failed to write status line");
        }
    }

    fn pass_completed(&mut self, report: &PassReport) {
        if let Err(e) = self.write_report(report) {
            tracing::debug!(error = %e, "failed to write pass report");
        }
    }

    fn pass_failed(&mut self, error: &Error) {
        let result = writeln!(self.out, "\n{}: {}", "error".red().bold(), error.to_string().red());
        if let Err(e) = result {
            tracing::debug!(error = %e, "failed to write pass failure");
        }
    }
}
