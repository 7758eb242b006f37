//! Text fixtures: console dumps and dispatcher sources.

use std::fs;
use std::path::Path;

use mapfix_blocks::{END_BANNER, START_BANNER};

/// Comment rule used by [`dispatcher_source`].
pub const COMMENT_REGEX: &str = r"//[^\n]*|/\*(?s:.*?)\*/";

/// Switch rule used by [`dispatcher_source`]; group 1 is the body between braces.
pub const SWITCH_REGEX: &str = r"switch\s*\(\s*name\s*\)\s*\{([^}]*)\}";

/// One console dump as the game prints it, timestamp included.
///
/// `main` adds an `MFilePath` line. Every returned line ends with `\n`.
pub fn console_dump(main: Option<&str>, path: &str, body: &[&str]) -> String {
    let mut out = format!("  3:17 {START_BANNER}\n");
    if let Some(main) = main {
        out.push_str(&format!("  3:17 MFilePath: {main}\n"));
    }
    out.push_str(&format!("  3:17 FilePath: {path}\n"));
    for line in body {
        out.push_str(&format!("  3:17 {line}\n"));
    }
    out.push_str(&format!("  3:17 {END_BANNER}\n"));
    out
}

/// Escape text for use inside a double-quoted XML attribute.
pub fn xml_attr(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Settings header lines for the given templates (attribute text, escapes
/// such as `\n` written literally).
pub fn settings_header(case_format: &str, default_format: &str) -> String {
    let xml = format!(
        "<MapFixer>\n  <Comments regex=\"{}\"/>\n  <Switch regex=\"{}\" contentGroup=\"1\">\n    <Case strFormat=\"{}\"/>\n    <Default strFormat=\"{}\"/>\n  </Switch>\n</MapFixer>",
        xml_attr(COMMENT_REGEX),
        xml_attr(SWITCH_REGEX),
        xml_attr(case_format),
        xml_attr(default_format),
    );
    xml.lines().map(|l| format!("///{l}\r\n")).collect()
}

/// A complete dispatcher: settings header, a commented-out decoy switch, and
/// a live `switch(name)` whose body is `region`.
pub fn dispatcher_source(case_format: &str, default_format: &str, region: &str) -> String {
    format!(
        "{}main(name)\r\n{{\r\n\t// switch(name) {{ case \"decoy\": }}\r\n\tswitch(name)\r\n\t{{{region}}}\r\n}}\r\n",
        settings_header(case_format, default_format)
    )
}

/// Stems of the `extension` files directly in `dir`, minus `exclude`, in the
/// order the filesystem lists them.
pub fn enumerated_stems(dir: &Path, extension: &str, exclude: &str) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|e| e == extension))
        .filter(|path| path.file_name().is_some_and(|n| n != exclude))
        .map(|path| path.file_stem().unwrap().to_string_lossy().into_owned())
        .collect()
}

/// Region text for `case "%s":\n` / `default:\n` templates listing `names`.
pub fn case_region<S: AsRef<str>>(names: &[S]) -> String {
    let mut region: String = names
        .iter()
        .map(|n| format!("case \"{}\":\n", n.as_ref()))
        .collect();
    region.push_str("default:\n");
    region
}
