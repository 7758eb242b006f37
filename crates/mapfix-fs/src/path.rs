//! Relative script paths as they appear in the game log

use std::path::{Path, PathBuf};

/// A path relative to an output root, exactly as the game printed it.
///
/// The game may print either separator. The original text is kept verbatim
/// for identity comparisons; separators only matter when the path is
/// resolved under a root directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptPath {
    raw: String,
}

impl ScriptPath {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The path as printed in the log.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn components(&self) -> impl Iterator<Item = &str> {
        self.raw.split(['/', '\\']).filter(|c| !c.is_empty())
    }

    /// Resolve this path under `root` using native separators.
    pub fn under(&self, root: &Path) -> PathBuf {
        let mut resolved = root.to_path_buf();
        for component in self.components() {
            resolved.push(component);
        }
        resolved
    }

    /// Resolve the directory containing this path under `root`.
    pub fn dir_under(&self, root: &Path) -> PathBuf {
        let mut resolved = root.to_path_buf();
        let components: Vec<&str> = self.components().collect();
        if let Some((_, dirs)) = components.split_last() {
            for component in dirs {
                resolved.push(component);
            }
        }
        resolved
    }
}

impl std::fmt::Display for ScriptPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for ScriptPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ScriptPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// File name without its final extension, like a script's case label.
pub fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// Whether `path` has exactly the extension `ext` (no leading dot).
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}
