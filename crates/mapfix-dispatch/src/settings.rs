//! Settings header embedded at the top of a dispatcher file.
//!
//! ```text
//! ///<MapFixer>
//! ///  <Comments regex="//[^\n]*"/>
//! ///  ...
//! ///</MapFixer>
//! main() { ... }
//! ```

use crate::error::{Error, Result};

/// Comment token that marks a settings line.
pub const SETTINGS_SENTINEL: &str = "///";

/// Return the settings payload: the leading run of sentinel lines with the
/// sentinel stripped, each line terminated by CRLF.
///
/// Extraction stops at the first line without the sentinel, so the header
/// must be a prefix of the file.
pub fn extract_settings(content: &str) -> Result<String> {
    let mut payload = String::new();

    for line in content.split('\n') {
        let line = line.trim_end_matches('\r');
        let Some(setting) = line.strip_prefix(SETTINGS_SENTINEL) else {
            break;
        };
        payload.push_str(setting);
        payload.push_str("\r\n");
    }

    if payload.is_empty() {
        return Err(Error::MissingSettings {
            sentinel: SETTINGS_SENTINEL,
        });
    }
    Ok(payload)
}
