//! Time and log access seams for the watcher.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use mapfix_fs::{Error, LogOpen, io};

use crate::Result;

/// Something the watcher can sleep on.
pub trait Clock {
    fn sleep(&self, duration: Duration);
}

/// Real wall-clock sleeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Access to the game log: its modification time and a lock-aware read.
pub trait LogSource {
    fn modified(&self) -> Result<SystemTime>;
    fn read(&self) -> Result<LogOpen>;
}

/// The log file on disk.
#[derive(Debug, Clone)]
pub struct FsLogSource {
    path: PathBuf,
}

impl FsLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for FsLogSource {
    fn modified(&self) -> Result<SystemTime> {
        let modified = std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|e| Error::io(&self.path, e))?;
        Ok(modified)
    }

    fn read(&self) -> Result<LogOpen> {
        Ok(io::open_log(&self.path)?)
    }
}

impl<T: LogSource + ?Sized> LogSource for &T {
    fn modified(&self) -> Result<SystemTime> {
        (**self).modified()
    }

    fn read(&self) -> Result<LogOpen> {
        (**self).read()
    }
}

/// Growing delay between polls while the game holds the log.
///
/// Starts at the poll interval, doubles per locked poll up to `max`, and
/// falls back to the poll interval once the log is readable again.
pub struct LockBackoff {
    inner: ExponentialBackoff,
}

impl LockBackoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        let inner = ExponentialBackoff {
            current_interval: base,
            initial_interval: base,
            randomization_factor: 0.0,
            multiplier: 2.0,
            max_interval: max.max(base),
            max_elapsed_time: None,
            ..ExponentialBackoff::default()
        };
        Self { inner }
    }

    /// Delay before the next poll while still locked.
    pub fn next_delay(&mut self) -> Duration {
        self.inner.next_backoff().unwrap_or(self.inner.max_interval)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
