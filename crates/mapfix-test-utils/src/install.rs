//! [`TestInstall`] builder for end-to-end scenarios.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Folder the tool runs from, two levels below the install root.
pub const TOOL_DIR: &str = "tools/mapfixer";

/// A temporary game install with a log folder and output folders.
///
/// # Example
///
/// ```rust,no_run
/// use mapfix_test_utils::TestInstall;
///
/// let install = TestInstall::new("mods/dev", &["mods/dev"]);
/// install.append_log("  0:00 hello\n");
/// install.assert_file_exists("mods/dev/games_mp.log");
/// ```
pub struct TestInstall {
    temp_dir: TempDir,
    log_folder: String,
    outputs: Vec<String>,
}

impl TestInstall {
    /// Create the install with an empty `games_mp.log` and empty outputs.
    pub fn new(log_folder: &str, outputs: &[&str]) -> Self {
        let install = Self {
            temp_dir: TempDir::new().unwrap(),
            log_folder: log_folder.to_string(),
            outputs: outputs.iter().map(|o| o.to_string()).collect(),
        };

        fs::create_dir_all(install.tool_dir()).unwrap();
        fs::create_dir_all(install.root().join(log_folder)).unwrap();
        for output in &install.outputs {
            fs::create_dir_all(install.root().join(output)).unwrap();
        }
        fs::write(install.log_path(), "").unwrap();
        install
    }

    /// Return the install root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Working directory the tool would be launched from.
    pub fn tool_dir(&self) -> PathBuf {
        self.root().join(TOOL_DIR)
    }

    pub fn log_folder(&self) -> &str {
        &self.log_folder
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn log_path(&self) -> PathBuf {
        self.root().join(&self.log_folder).join("games_mp.log")
    }

    /// Append raw text to the game log.
    pub fn append_log(&self, text: &str) {
        let mut file = OpenOptions::new().append(true).open(self.log_path()).unwrap();
        file.write_all(text.as_bytes()).unwrap();
    }

    /// Write a file under an output folder, creating parents.
    pub fn write_output(&self, output: &str, relative: &str, content: impl AsRef<[u8]>) {
        let path = self.root().join(output).join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Read a file under an output folder as bytes.
    pub fn read_output(&self, output: &str, relative: &str) -> Vec<u8> {
        fs::read(self.root().join(output).join(relative)).unwrap()
    }

    /// Assert that `path` (relative to the install root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
