//! Integration tests for dispatcher regeneration.

use std::fs;
use std::path::Path;

use mapfix_dispatch::{Error, regenerate, regenerate_content, sibling_scripts};
use mapfix_test_utils::fixtures::{case_region, dispatcher_source, enumerated_stems};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const CASE: &str = r#"case "%s":\n"#;
const DEFAULT: &str = r"default:\n";

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "main() {}\n").unwrap();
}

fn setup(region: &str, siblings: &[&str]) -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let dispatcher = temp.path().join("main.gsc");
    fs::write(&dispatcher, dispatcher_source(CASE, DEFAULT, region)).unwrap();
    for name in siblings {
        touch(temp.path(), name);
    }
    (temp, dispatcher)
}

#[test]
fn test_region_lists_siblings_then_default() {
    let (temp, dispatcher) = setup("\r\n\t\tcase \"stale\":\r\n\t", &["a.gsc", "b.gsc"]);

    let report = regenerate(&dispatcher, temp.path(), "gsc").unwrap();

    let expected = enumerated_stems(temp.path(), "gsc", "main.gsc");
    let mut sorted = expected.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(report.cases, expected);
    assert!(report.changed);
    let content = fs::read_to_string(&dispatcher).unwrap();
    assert_eq!(content, dispatcher_source(CASE, DEFAULT, &case_region(&expected)));
}

#[test]
fn test_second_run_is_byte_identical() {
    let (temp, dispatcher) = setup("", &["b.gsc", "a.gsc", "c.gsc"]);

    regenerate(&dispatcher, temp.path(), "gsc").unwrap();
    let first = fs::read(&dispatcher).unwrap();
    let report = regenerate(&dispatcher, temp.path(), "gsc").unwrap();
    let second = fs::read(&dispatcher).unwrap();

    assert_eq!(first, second);
    assert!(!report.changed);
}

#[test]
fn test_commented_decoy_switch_is_untouched() {
    let (temp, dispatcher) = setup("", &["a.gsc"]);

    regenerate(&dispatcher, temp.path(), "gsc").unwrap();

    let content = fs::read_to_string(&dispatcher).unwrap();
    assert!(content.contains("// switch(name) { case \"decoy\": }"));
    assert!(content.contains("\t{case \"a\":\ndefault:\n}"));
}

#[test]
fn test_empty_directory_leaves_only_default() {
    let (temp, dispatcher) = setup("case \"gone\":\n", &[]);

    let report = regenerate(&dispatcher, temp.path(), "gsc").unwrap();

    assert!(report.cases.is_empty());
    assert!(fs::read_to_string(&dispatcher).unwrap().contains("\t{default:\n}"));
}

#[test]
fn test_only_matching_files_in_top_directory() {
    let (temp, dispatcher) = setup("", &["a.gsc", "notes.txt", "b.gsc.bak"]);
    fs::create_dir(temp.path().join("nested")).unwrap();
    touch(&temp.path().join("nested"), "deep.gsc");
    fs::create_dir(temp.path().join("dir.gsc")).unwrap();

    let siblings = sibling_scripts(temp.path(), &dispatcher, "gsc").unwrap();

    assert_eq!(siblings, vec![temp.path().join("a.gsc")]);
}

#[test]
fn test_siblings_keep_directory_listing_order() {
    let (temp, dispatcher) = setup("", &["zeta.gsc", "B.gsc", "a.gsc", "Mid.gsc"]);

    let siblings = sibling_scripts(temp.path(), &dispatcher, "gsc").unwrap();
    let report = regenerate(&dispatcher, temp.path(), "gsc").unwrap();

    let listed = enumerated_stems(temp.path(), "gsc", "main.gsc");
    let stems: Vec<String> = siblings
        .iter()
        .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(stems, listed);
    assert_eq!(report.cases, listed);
}

#[test]
fn test_missing_switch_node_is_fatal_and_file_unchanged() {
    let temp = TempDir::new().unwrap();
    let dispatcher = temp.path().join("main.gsc");
    let source = "///<MapFixer>\r\n///  <Comments regex=\"//[^\\n]*\"/>\r\n///</MapFixer>\r\nmain(name)\r\n{\r\n\tswitch(name)\r\n\t{}\r\n}\r\n";
    fs::write(&dispatcher, source).unwrap();
    touch(temp.path(), "a.gsc");

    let err = regenerate(&dispatcher, temp.path(), "gsc").unwrap_err();

    assert!(matches!(err, Error::MissingNode { node: "Switch" }));
    assert_eq!(fs::read_to_string(&dispatcher).unwrap(), source);
}

#[test]
fn test_no_switch_match_is_fatal_and_file_unchanged() {
    let temp = TempDir::new().unwrap();
    let dispatcher = temp.path().join("main.gsc");
    let source = dispatcher_source(CASE, DEFAULT, "").replace("\tswitch(name)", "\tif(name)");
    fs::write(&dispatcher, &source).unwrap();

    let err = regenerate(&dispatcher, temp.path(), "gsc").unwrap_err();

    assert!(matches!(err, Error::NoSwitchMatch));
    assert_eq!(fs::read_to_string(&dispatcher).unwrap(), source);
}

#[test]
fn test_missing_header_is_fatal() {
    let temp = TempDir::new().unwrap();
    let dispatcher = temp.path().join("main.gsc");
    fs::write(&dispatcher, "main(name)\r\n{\r\n\tswitch(name)\r\n\t{}\r\n}\r\n").unwrap();

    assert!(matches!(
        regenerate(&dispatcher, temp.path(), "gsc"),
        Err(Error::MissingSettings { .. })
    ));
}

#[test]
fn test_output_uses_legacy_code_page() {
    let (temp, dispatcher) = setup("", &["zażółć.gsc"]);

    regenerate(&dispatcher, temp.path(), "gsc").unwrap();

    let bytes = fs::read(&dispatcher).unwrap();
    assert!(std::str::from_utf8(&bytes).is_err());
    let needle: &[u8] = b"case \"za\xBF\xF3\xB3\xE6\":\n";
    assert!(bytes.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn test_composite_placeholder() {
    let source = dispatcher_source(r"case {0}: {{ }}\n", r"\tdefault:\n", "");

    let updated = regenerate_content(&source, &["x".to_string(), "y".to_string()]).unwrap();

    assert_eq!(
        updated,
        dispatcher_source(r"case {0}: {{ }}\n", r"\tdefault:\n", "case x: { }\ncase y: { }\n\tdefault:\n")
    );
}

#[test]
fn test_region_ending_inside_multibyte_comment_is_rejected() {
    let temp = TempDir::new().unwrap();
    let dispatcher = temp.path().join("main.gsc");
    let source = concat!(
        "///<MapFixer>\r\n",
        "///  <Comments regex=\"//[^\\n]*\"/>\r\n",
        "///  <Switch regex=\"switch\\{(.{0,3})\" contentGroup=\"1\">\r\n",
        "///    <Case strFormat=\"%s\"/>\r\n",
        "///    <Default strFormat=\"\"/>\r\n",
        "///  </Switch>\r\n",
        "///</MapFixer>\r\n",
        "switch{//ż\n}\r\n",
    );
    fs::write(&dispatcher, source).unwrap();
    touch(temp.path(), "a.gsc");

    assert!(matches!(
        regenerate_content(source, &["a".to_string()]),
        Err(Error::RegionSplitsCharacter { .. })
    ));
    assert!(matches!(
        regenerate(&dispatcher, temp.path(), "gsc"),
        Err(Error::RegionSplitsCharacter { .. })
    ));
    assert_eq!(fs::read_to_string(&dispatcher).unwrap(), source);
}
