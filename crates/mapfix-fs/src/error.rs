//! Error types for mapfix-fs

use std::path::PathBuf;

/// Result type for mapfix-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mapfix-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Cannot encode {path} as {encoding}: text contains unmappable characters")]
    Unencodable {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("Install root cannot be derived from {cwd}: it has fewer than two ancestors")]
    InstallRoot { cwd: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
