//! Switch regeneration.
//!
//! Rebuilds the generated region of a dispatcher from the scripts that sit
//! next to it. The result depends only on the dispatcher's own header and the
//! sibling listing, so an unchanged directory reproduces the same bytes.

use std::fs;
use std::path::{Path, PathBuf};

use mapfix_fs::{io, path};

use crate::config::DispatcherConfig;
use crate::error::Result;
use crate::region::{blank_comments, locate_region, splice};

/// What a regeneration pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenReport {
    /// Case labels, in the order they were written.
    pub cases: Vec<String>,
    /// Whether the dispatcher bytes on disk changed.
    pub changed: bool,
}

/// Case entries for `names` followed by the default entry.
pub fn render_switch_body(config: &DispatcherConfig, names: &[String]) -> String {
    let mut body = String::new();
    for name in names {
        body.push_str(&config.case_template.render(name));
    }
    body.push_str(&config.default_template);
    body
}

/// Rewrite dispatcher text so its region lists exactly `names`.
///
/// The settings are read from `content` itself.
pub fn regenerate_content(content: &str, names: &[String]) -> Result<String> {
    let config = DispatcherConfig::from_dispatcher(content)?;
    let blanked = blank_comments(content, &config.comment_pattern);
    let region = locate_region(&blanked, &config.switch_pattern, config.switch_content_group)?;
    splice(content, region, &render_switch_body(&config, names))
}

/// Scripts with `extension` directly inside `dir`, excluding `dispatcher`.
///
/// Entries keep the order the filesystem enumerates them in.
pub fn sibling_scripts(dir: &Path, dispatcher: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| mapfix_fs::Error::io(dir, e))?;

    let mut scripts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| mapfix_fs::Error::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| mapfix_fs::Error::io(entry.path(), e))?;
        let candidate = entry.path();
        if !file_type.is_file() || !path::has_extension(&candidate, extension) {
            continue;
        }
        if candidate == dispatcher {
            continue;
        }
        scripts.push(candidate);
    }

    Ok(scripts)
}

/// Regenerate `dispatcher` in place from the scripts in `siblings_dir`.
///
/// Nothing is written unless every step succeeds. The file is stored in
/// the legacy code page and left untouched when its bytes would not change.
pub fn regenerate(dispatcher: &Path, siblings_dir: &Path, extension: &str) -> Result<RegenReport> {
    let original = io::read_bytes(dispatcher)?;
    let content = io::decode_legacy(&original);

    let cases: Vec<String> = sibling_scripts(siblings_dir, dispatcher, extension)?
        .iter()
        .filter_map(|p| path::file_stem(p))
        .collect();

    let updated = regenerate_content(&content, &cases)?;
    let encoded = io::encode_legacy(dispatcher, &updated)?;

    let changed = encoded != original;
    if changed {
        io::write_atomic(dispatcher, &encoded)?;
    }

    tracing::info!(
        dispatcher = %dispatcher.display(),
        cases = cases.len(),
        changed,
        "regenerated dispatcher"
    );

    Ok(RegenReport { cases, changed })
}
