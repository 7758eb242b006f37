//! Error types for mapfix-core

use std::path::PathBuf;

/// Result type for mapfix-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mapfix-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Regenerating a dispatcher failed; the file was left as it was
    #[error("Failed to regenerate dispatcher {path}: {source}")]
    Dispatcher {
        path: PathBuf,
        #[source]
        source: mapfix_dispatch::Error,
    },

    /// Runtime configuration is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Filesystem error from mapfix-fs
    #[error(transparent)]
    Fs(#[from] mapfix_fs::Error),
}
