//! Block parsing for MapFixer.
//!
//! The in-game console dumps script files into the game log between two
//! banner lines:
//!
//! ```text
//! 12:01 == MAPFIXER START =============================================================
//! 12:01 MFilePath: maps/mp/main.gsc
//! 12:01 FilePath: maps/mp/sub/a.gsc
//! 12:01 first line of a.gsc
//! 12:01 second line of a.gsc
//! 12:01 == MAPFIXER END =============================================================
//! ```
//!
//! Only the tail written since the previous pass is parsed, from the end of
//! the log backwards, so the most recent dump of a file always wins.

pub mod markers;
pub mod parser;

pub use markers::{END_BANNER, LINE_ENDING, START_BANNER};
pub use parser::{ExtractedRecord, ParseOutcome, parse_tail, split_log_lines};
