//! Extraction pipeline and log watcher for MapFixer
//!
//! This crate ties the Layer 0 crates together:
//!
//! - **Pipeline**: parse the new tail of the log, write every record to every
//!   output folder, regenerate the dispatcher switch
//! - **Watcher**: poll the log, infer whether the game is running, checkpoint
//!   between passes
//! - **Configuration**: one explicit [`RuntimeConfig`] value, optionally
//!   layered from a TOML file
//!
//! # Architecture
//!
//! ```text
//!                  mapfix-cli
//!                      |
//!                 mapfix-core
//!                      |
//!     +----------------+----------------+
//!     |                |                |
//! mapfix-fs      mapfix-blocks    mapfix-dispatch
//! ```
//!
//! # Example
//!
//! ```ignore
//! use mapfix_core::{RuntimeConfig, process_lines};
//! use mapfix_fs::InstallLayout;
//!
//! let config = RuntimeConfig::new(InstallLayout::new("/games/cod"), "mods/dev")
//!     .with_outputs(["mods/dev"]);
//! let report = process_lines(&config, &lines, 0)?;
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod materialize;
pub mod pipeline;
pub mod watcher;

pub use clock::{Clock, FsLogSource, LockBackoff, LogSource, SystemClock};
pub use config::{
    ConfigFile, DEFAULT_LOCKED_BACKOFF_MAX, DEFAULT_LOG_FILE_NAME, DEFAULT_POLL_INTERVAL,
    DEFAULT_SCRIPT_EXTENSION, RuntimeConfig,
};
pub use error::{Error, Result};
pub use materialize::materialize;
pub use pipeline::{DispatcherUpdate, PassReport, process_lines};
pub use watcher::{GameState, LogWatcher, PollEvent, StatusSink};
