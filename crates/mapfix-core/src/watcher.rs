//! Log watcher.
//!
//! Polls the log's modification time and runs a pass over the lines added
//! since the previous successful pass. While the game holds the log
//! exclusively the watcher reports the game as running and backs off.

use std::time::SystemTime;

use mapfix_blocks::split_log_lines;
use mapfix_fs::LogOpen;

use crate::clock::{Clock, LockBackoff, LogSource};
use crate::config::RuntimeConfig;
use crate::pipeline::{PassReport, process_lines};
use crate::{Error, Result};

/// Game state inferred from log access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// The log can be read; the game is not in a session.
    Idle,
    /// The game holds the log exclusively.
    InGame,
}

/// What a single poll observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// The log has not been modified since the last pass.
    Unchanged,
    /// The log is held by the game; try again later.
    Locked,
    /// A pass ran over the new lines.
    Processed(PassReport),
}

/// Receives what the watcher wants the operator to see.
pub trait StatusSink {
    /// Called whenever the inferred game state changes.
    fn game_state(&mut self, state: GameState);
    /// Called after a pass that extracted at least one record.
    fn pass_completed(&mut self, report: &PassReport);
    /// Called when a pass failed; its records will be retried once the log grows.
    fn pass_failed(&mut self, error: &Error);
}

#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    /// First line of the next scan.
    line: usize,
    modified: SystemTime,
}

/// Drives passes over a growing game log.
pub struct LogWatcher<S, C> {
    config: RuntimeConfig,
    source: S,
    clock: C,
    checkpoint: Option<Checkpoint>,
    backoff: LockBackoff,
    state: GameState,
    reported: Option<GameState>,
}

impl<S: LogSource, C: Clock> LogWatcher<S, C> {
    pub fn new(config: RuntimeConfig, source: S, clock: C) -> Self {
        let backoff = LockBackoff::new(config.poll_interval, config.locked_backoff_max);
        Self {
            config,
            source,
            clock,
            checkpoint: None,
            backoff,
            state: GameState::Idle,
            reported: None,
        }
    }

    /// Line the next scan stops at, once primed.
    pub fn checkpoint_line(&self) -> Option<usize> {
        self.checkpoint.map(|c| c.line)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Record the current end of the log without processing it.
    ///
    /// Returns `false` when the log is locked and nothing was recorded.
    pub fn prime(&mut self) -> Result<bool> {
        let modified = self.source.modified()?;
        match self.source.read()? {
            LogOpen::Locked => {
                self.state = GameState::InGame;
                Ok(false)
            }
            LogOpen::Readable(text) => {
                let line = split_log_lines(&text).len().saturating_sub(1);
                self.checkpoint = Some(Checkpoint { line, modified });
                self.state = GameState::Idle;
                tracing::debug!(line, "primed log checkpoint");
                Ok(true)
            }
        }
    }

    /// Check the log once and run a pass if it changed.
    ///
    /// A failed pass keeps the line checkpoint, so its blocks are parsed
    /// again after the next modification, but records the modification
    /// time so the same failure is not repeated every poll.
    pub fn poll_once(&mut self) -> Result<PollEvent> {
        let Some(checkpoint) = self.checkpoint else {
            return Ok(if self.prime()? {
                PollEvent::Unchanged
            } else {
                PollEvent::Locked
            });
        };

        let modified = self.source.modified()?;
        if modified <= checkpoint.modified {
            return Ok(PollEvent::Unchanged);
        }

        let text = match self.source.read()? {
            LogOpen::Locked => {
                self.state = GameState::InGame;
                return Ok(PollEvent::Locked);
            }
            LogOpen::Readable(text) => text,
        };
        self.state = GameState::Idle;
        self.backoff.reset();

        let lines = split_log_lines(&text);
        match process_lines(&self.config, &lines, checkpoint.line) {
            Ok(report) => {
                self.checkpoint = Some(Checkpoint {
                    line: lines.len().saturating_sub(1),
                    modified,
                });
                Ok(PollEvent::Processed(report))
            }
            Err(e) => {
                self.checkpoint = Some(Checkpoint {
                    modified,
                    ..checkpoint
                });
                Err(e)
            }
        }
    }

    /// Sleep, poll, and report the outcome to `sink`.
    pub fn tick(&mut self, sink: &mut impl StatusSink) {
        let delay = match self.state {
            GameState::InGame => self.backoff.next_delay(),
            GameState::Idle => self.config.poll_interval,
        };
        self.clock.sleep(delay);

        match self.poll_once() {
            Ok(PollEvent::Processed(report)) if !report.is_empty() => sink.pass_completed(&report),
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "pass failed");
                sink.pass_failed(&e);
            }
        }

        if self.reported != Some(self.state) {
            self.reported = Some(self.state);
            sink.game_state(self.state);
        }
    }

    /// Poll until the process is terminated.
    pub fn run(&mut self, sink: &mut impl StatusSink) -> ! {
        loop {
            self.tick(sink);
        }
    }
}
