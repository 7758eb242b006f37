//! Banner and field markers printed by the in-game console script.

/// Suffix of the line that opens a dump (last line seen when scanning backwards).
pub const START_BANNER: &str =
    "== MAPFIXER START =============================================================";

/// Suffix of the line that closes a dump (first line seen when scanning backwards).
pub const END_BANNER: &str =
    "== MAPFIXER END =============================================================";

/// Declares the dispatcher file for the whole pass.
pub const MAIN_PATH_FIELD: &str = "MFilePath: ";

/// Declares the file a block carries.
pub const FILE_PATH_FIELD: &str = "FilePath: ";

/// Line terminator used when rebuilding block bodies.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Drop the timestamp token the game prefixes to every console line.
///
/// Leading whitespace is trimmed, then everything up to and including the
/// first space is removed. A line without a space is returned trimmed.
pub fn strip_timestamp(line: &str) -> &str {
    let line = line.trim_start();
    match line.find(' ') {
        Some(idx) => &line[idx + 1..],
        None => line,
    }
}
