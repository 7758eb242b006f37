//! One extraction pass: parse the log tail, write the records, regenerate
//! the dispatcher in every output target.

use std::path::PathBuf;

use mapfix_blocks::{ExtractedRecord, parse_tail};
use mapfix_dispatch::RegenReport;
use mapfix_fs::ScriptPath;

use crate::config::RuntimeConfig;
use crate::materialize::materialize;
use crate::{Error, Result};

/// Dispatcher rewritten in one output target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherUpdate {
    pub path: PathBuf,
    pub report: RegenReport,
}

/// Report from one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Records extracted, most recent first
    pub records: Vec<ExtractedRecord>,
    /// Dispatcher named by `MFilePath`, if any
    pub main_path: Option<ScriptPath>,
    /// Files written, record-major
    pub written: Vec<PathBuf>,
    /// Dispatchers regenerated, one per output target
    pub dispatchers: Vec<DispatcherUpdate>,
}

impl PassReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Run a pass over `lines` from `start_line` to the end.
///
/// The dispatcher is regenerated against the directory of the most recent
/// record. A pass that extracts records without an `MFilePath` writes them
/// but leaves dispatchers alone.
pub fn process_lines<S: AsRef<str>>(
    config: &RuntimeConfig,
    lines: &[S],
    start_line: usize,
) -> Result<PassReport> {
    let outcome = parse_tail(lines, start_line);
    if outcome.is_empty() {
        return Ok(PassReport::default());
    }

    for record in &outcome.records {
        tracing::info!(path = %record.path, bytes = record.content.len(), "extracted");
    }

    let targets = config.output_roots();
    let written = materialize(&outcome.records, &targets)?;

    let mut dispatchers = Vec::new();
    match (&outcome.main_path, outcome.records.first()) {
        (Some(main), Some(newest)) => {
            for target in &targets {
                let dispatcher = main.under(target);
                let siblings = newest.path.dir_under(target);
                let report = mapfix_dispatch::regenerate(
                    &dispatcher,
                    &siblings,
                    &config.script_extension,
                )
                .map_err(|source| Error::Dispatcher {
                    path: dispatcher.clone(),
                    source,
                })?;
                dispatchers.push(DispatcherUpdate {
                    path: dispatcher,
                    report,
                });
            }
        }
        _ => {
            tracing::warn!(
                records = outcome.records.len(),
                "no MFilePath in this pass; dispatcher not regenerated"
            );
        }
    }

    Ok(PassReport {
        records: outcome.records,
        main_path: outcome.main_path,
        written,
        dispatchers,
    })
}
