//! Filesystem layer for MapFixer
//!
//! Provides install-root resolution, relative script paths, atomic writes and
//! the legacy single-byte encoding the game's script engine expects.

pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use config::load_toml;
pub use error::{Error, Result};
pub use io::{LEGACY_ENCODING, LogOpen};
pub use layout::InstallLayout;
pub use path::ScriptPath;
