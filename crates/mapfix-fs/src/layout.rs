//! Install layout resolution
//!
//! The tool lives two directories below the game's install root. Log and
//! output folders are named relative to that root.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Resolved directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
}

impl InstallLayout {
    /// Use an explicit install root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Derive the install root from the working directory: two levels up.
    pub fn from_working_dir(cwd: &Path) -> Result<Self> {
        let cwd = dunce::canonicalize(cwd).map_err(|e| Error::io(cwd, e))?;
        let root = cwd
            .parent()
            .and_then(Path::parent)
            .ok_or_else(|| Error::InstallRoot { cwd: cwd.clone() })?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a game folder (log folder or output target) by name.
    pub fn folder(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Full path of the log file inside `log_folder`.
    pub fn log_file(&self, log_folder: &str, file_name: &str) -> PathBuf {
        self.folder(log_folder).join(file_name)
    }
}
