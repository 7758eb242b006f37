//! Case and default entry templates.

/// Resolve `\t`, `\r`, `\n` and `\\` escapes in a settings attribute.
///
/// Any other backslash sequence is kept as written.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Template for one switch case, with the script name as its only argument.
///
/// The name is substituted for every `{0}` or `%s`; `{{` and `}}` produce
/// literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTemplate {
    text: String,
}

impl CaseTemplate {
    /// Build from the raw attribute value, resolving escapes.
    pub fn new(raw: &str) -> Self {
        Self {
            text: unescape(raw),
        }
    }

    pub fn render(&self, name: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + name.len());
        let mut rest = self.text.as_str();

        while let Some(idx) = rest.find(['{', '}', '%']) {
            out.push_str(&rest[..idx]);
            let tail = &rest[idx..];
            let (piece, consumed) = if tail.starts_with("{0}") {
                (name, 3)
            } else if tail.starts_with("%s") {
                (name, 2)
            } else if tail.starts_with("{{") {
                ("{", 2)
            } else if tail.starts_with("}}") {
                ("}", 2)
            } else {
                (&tail[..1], 1)
            };
            out.push_str(piece);
            rest = &tail[consumed..];
        }
        out.push_str(rest);
        out
    }
}
