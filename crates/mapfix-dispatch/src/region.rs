//! Locating and splicing the generated region.
//!
//! The switch pattern runs against a copy of the dispatcher whose comments
//! are blanked with spaces. Blanking keeps every byte offset, so the span
//! found in the copy is valid in the original text.

use std::ops::Range;

use regex::Regex;

use crate::error::{Error, Result};

/// Replace every match of `comments` with the same number of spaces.
pub fn blank_comments(content: &str, comments: &Regex) -> String {
    let mut blanked = String::with_capacity(content.len());
    let mut last = 0;

    for m in comments.find_iter(content) {
        blanked.push_str(&content[last..m.start()]);
        blanked.extend(std::iter::repeat_n(' ', m.len()));
        last = m.end();
    }
    blanked.push_str(&content[last..]);
    blanked
}

/// Byte span of capture group `group` in the first match of `switch`.
pub fn locate_region(blanked: &str, switch: &Regex, group: usize) -> Result<Range<usize>> {
    let groups = switch.captures_len();
    if group >= groups {
        return Err(Error::GroupOutOfRange {
            group,
            groups: groups - 1,
        });
    }

    let caps = switch.captures(blanked).ok_or(Error::NoSwitchMatch)?;
    let region = caps.get(group).ok_or(Error::GroupNotMatched { group })?;
    Ok(region.range())
}

/// Replace `region` of `content` with `replacement`.
///
/// Blanking is per byte, so a region found in the blanked copy can end in
/// the middle of a multibyte character of a comment. Such a region is
/// rejected.
pub fn splice(content: &str, region: Range<usize>, replacement: &str) -> Result<String> {
    for offset in [region.start, region.end] {
        if !content.is_char_boundary(offset) {
            return Err(Error::RegionSplitsCharacter { offset });
        }
    }

    let mut out = String::with_capacity(content.len() - region.len() + replacement.len());
    out.push_str(&content[..region.start]);
    out.push_str(replacement);
    out.push_str(&content[region.end..]);
    Ok(out)
}
