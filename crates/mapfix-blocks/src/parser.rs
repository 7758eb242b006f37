//! Backward block parser.
//!
//! Walks the log from its last line down to a checkpoint, rebuilding every
//! complete dump into an [`ExtractedRecord`].

use std::collections::HashSet;

use mapfix_fs::ScriptPath;

use crate::markers::{
    END_BANNER, FILE_PATH_FIELD, LINE_ENDING, MAIN_PATH_FIELD, START_BANNER, strip_timestamp,
};

/// A script file recovered from the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// Path relative to an output root, as printed by the game.
    pub path: ScriptPath,
    /// File content with one [`LINE_ENDING`] after every line.
    pub content: String,
}

/// Everything one pass over the log tail produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Records ordered most recent first, one per path.
    pub records: Vec<ExtractedRecord>,
    /// Dispatcher declared by the most recent `MFilePath` field.
    pub main_path: Option<ScriptPath>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Block currently being rebuilt; lines arrive bottom-up.
#[derive(Default)]
struct OpenBlock<'a> {
    path: Option<&'a str>,
    reversed_body: Vec<&'a str>,
}

impl OpenBlock<'_> {
    fn content(&self) -> String {
        let mut content = String::new();
        for line in self.reversed_body.iter().rev() {
            content.push_str(line);
            content.push_str(LINE_ENDING);
        }
        content
    }
}

/// Split raw log text into lines. A trailing newline yields an empty last line.
pub fn split_log_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Parse every complete block between `start_line` (inclusive) and the end of
/// `lines`.
///
/// A block still open when the scan reaches `start_line` is dropped, as is a
/// block without a `FilePath` or one whose path was already seen in this pass.
pub fn parse_tail<S: AsRef<str>>(lines: &[S], start_line: usize) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut main_path: Option<&str> = None;
    let mut open: Option<OpenBlock<'_>> = None;

    for raw in lines.iter().skip(start_line).rev() {
        let line = raw.as_ref().trim_end_matches('\r');

        if line.ends_with(END_BANNER) {
            if open.is_some() {
                tracing::debug!("block without start banner discarded");
            }
            open = Some(OpenBlock::default());
            continue;
        }

        let Some(block) = open.as_mut() else {
            continue;
        };

        if line.ends_with(START_BANNER) {
            match block.path.filter(|p| !p.is_empty()) {
                Some(path) if seen.insert(path) => {
                    outcome.records.push(ExtractedRecord {
                        path: ScriptPath::new(path),
                        content: block.content(),
                    });
                }
                Some(path) => {
                    tracing::debug!(path, "older duplicate block dropped");
                }
                None => {
                    tracing::debug!("block without file path dropped");
                }
            }
            open = None;
            continue;
        }

        let text = strip_timestamp(line);
        if let Some(path) = text.strip_prefix(MAIN_PATH_FIELD) {
            // Scanning backwards, the first one seen is the newest
            main_path.get_or_insert(path);
        } else if let Some(path) = text.strip_prefix(FILE_PATH_FIELD) {
            block.path = Some(path);
        } else {
            block.reversed_body.push(text);
        }
    }

    if open.is_some() {
        tracing::debug!(start_line, "unterminated block at scan boundary discarded");
    }

    outcome.main_path = main_path.map(ScriptPath::new);
    outcome
}
