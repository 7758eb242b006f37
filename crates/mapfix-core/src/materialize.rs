//! Writing extracted records to every output target.

use std::path::PathBuf;

use mapfix_blocks::ExtractedRecord;
use mapfix_fs::io;

use crate::Result;

/// Write every record under every target root, overwriting existing files.
///
/// Returns the written paths, record-major. The first failure stops the
/// projection and is returned as is.
pub fn materialize(records: &[ExtractedRecord], targets: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(records.len() * targets.len());

    for record in records {
        for target in targets {
            let path = record.path.under(target);
            io::write_text(&path, &record.content)?;
            tracing::debug!(path = %path.display(), "materialized");
            written.push(path);
        }
    }

    Ok(written)
}
