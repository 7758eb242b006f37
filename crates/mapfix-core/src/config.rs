//! Runtime configuration
//!
//! Everything a pass needs is carried in a [`RuntimeConfig`] value that is
//! passed to each component explicitly. A [`ConfigFile`] is the optional
//! TOML layer underneath command-line arguments.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mapfix_fs::InstallLayout;
use serde::Deserialize;

use crate::{Error, Result};

/// Log file the game writes inside its log folder.
pub const DEFAULT_LOG_FILE_NAME: &str = "games_mp.log";

/// Extension of scripts listed in a dispatcher.
pub const DEFAULT_SCRIPT_EXTENSION: &str = "gsc";

/// Delay between two checks of the log's modification time.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Upper bound for the delay between checks while the game holds the log.
pub const DEFAULT_LOCKED_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// Optional `mapfixer.toml` layer.
///
/// ```toml
/// log_folder = "mods/mp_dev"
/// output_folders = ["mods/mp_dev", "mods/mp_release"]
/// poll_interval_ms = 100
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub verbose: Option<bool>,
    pub install_root: Option<PathBuf>,
    pub log_folder: Option<String>,
    pub log_file_name: Option<String>,
    #[serde(default)]
    pub output_folders: Vec<String>,
    pub script_extension: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub locked_backoff_max_ms: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(mapfix_fs::load_toml(path)?)
    }
}

/// Resolved configuration for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Echo extracted content and enable debug logging.
    pub verbose: bool,
    pub layout: InstallLayout,
    /// Folder, relative to the install root, holding the game log.
    pub log_folder: String,
    pub log_file_name: String,
    /// Folders, relative to the install root, receiving identical output.
    pub output_folders: Vec<String>,
    pub script_extension: String,
    pub poll_interval: Duration,
    pub locked_backoff_max: Duration,
}

impl RuntimeConfig {
    /// Configuration with defaults for everything but the folders.
    pub fn new(layout: InstallLayout, log_folder: impl Into<String>) -> Self {
        Self {
            verbose: false,
            layout,
            log_folder: log_folder.into(),
            log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            output_folders: Vec::new(),
            script_extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            locked_backoff_max: DEFAULT_LOCKED_BACKOFF_MAX,
        }
    }

    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_folders = outputs.into_iter().map(Into::into).collect();
        self
    }

    /// Apply the values a config file sets. Output folders are appended.
    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(verbose) = file.verbose {
            self.verbose = verbose;
        }
        if let Some(root) = file.install_root {
            self.layout = InstallLayout::new(root);
        }
        if let Some(folder) = file.log_folder {
            self.log_folder = folder;
        }
        if let Some(name) = file.log_file_name {
            self.log_file_name = name;
        }
        self.output_folders.extend(file.output_folders);
        if let Some(ext) = file.script_extension {
            self.script_extension = ext;
        }
        if let Some(ms) = file.poll_interval_ms {
            self.poll_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = file.locked_backoff_max_ms {
            self.locked_backoff_max = Duration::from_millis(ms);
        }
    }

    /// Reject configurations no pass could run with.
    pub fn validate(&self) -> Result<()> {
        if self.log_folder.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "no log folder given".into(),
            });
        }
        if self.script_extension.is_empty() || self.script_extension.starts_with('.') {
            return Err(Error::InvalidConfig {
                message: format!(
                    "script extension {:?} must be non-empty and have no leading dot",
                    self.script_extension
                ),
            });
        }
        if self.poll_interval.is_zero() {
            return Err(Error::InvalidConfig {
                message: "poll interval must be positive".into(),
            });
        }
        if self.output_folders.is_empty() {
            tracing::warn!("no output folders configured; extracted files will not be written");
        }
        Ok(())
    }

    pub fn log_path(&self) -> PathBuf {
        self.layout.log_file(&self.log_folder, &self.log_file_name)
    }

    pub fn output_roots(&self) -> Vec<PathBuf> {
        self.output_folders
            .iter()
            .map(|folder| self.layout.folder(folder))
            .collect()
    }
}
