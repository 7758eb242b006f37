//! End-to-end integration test for the extraction flow
//!
//! Exercises the complete chain on a real temporary install:
//! game log -> block parser -> materialized files -> regenerated dispatchers.

use std::fs::{self, OpenOptions};
use std::time::{Duration, SystemTime};

use mapfix_blocks::{LINE_ENDING, split_log_lines};
use mapfix_core::{FsLogSource, LogWatcher, PollEvent, RuntimeConfig, SystemClock, process_lines};
use mapfix_fs::InstallLayout;
use mapfix_test_utils::TestInstall;
use mapfix_test_utils::fixtures::{case_region, console_dump, dispatcher_source, enumerated_stems};
use pretty_assertions::assert_eq;

const CASE: &str = r#"case "%s":\n"#;
const DEFAULT: &str = r"default:\n";

fn config_for(install: &TestInstall) -> RuntimeConfig {
    RuntimeConfig::new(InstallLayout::new(install.root()), install.log_folder())
        .with_outputs(install.outputs().iter().cloned())
}

fn whole_log_pass(install: &TestInstall) -> mapfix_core::PassReport {
    let text = fs::read_to_string(install.log_path()).unwrap();
    process_lines(&config_for(install), &split_log_lines(&text), 0).unwrap()
}

fn set_log_mtime(install: &TestInstall, secs: u64) {
    let file = OpenOptions::new()
        .write(true)
        .open(install.log_path())
        .unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

// =============================================================================
// Single pass
// =============================================================================

#[test]
fn test_dump_in_subfolder_is_materialized() {
    let install = TestInstall::new("mods/dev", &["mods/dev"]);
    install.write_output("mods/dev", "main.gsc", dispatcher_source(CASE, DEFAULT, ""));
    install.append_log(&console_dump(Some("main.gsc"), "sub/a.gsc", &["hello", "world"]));

    let report = whole_log_pass(&install);

    assert_eq!(report.main_path.as_ref().map(|p| p.as_str()), Some("main.gsc"));
    let content = install.read_output("mods/dev", "sub/a.gsc");
    assert_eq!(
        String::from_utf8(content).unwrap(),
        format!("hello{LINE_ENDING}world{LINE_ENDING}")
    );
}

#[test]
fn test_dispatcher_lists_every_sibling() {
    let install = TestInstall::new("mods/dev", &["mods/dev"]);
    install.write_output("mods/dev", "main.gsc", dispatcher_source(CASE, DEFAULT, ""));
    install.write_output("mods/dev", "b.gsc", "b() {}\n");
    install.append_log(&console_dump(Some("main.gsc"), "a.gsc", &["a() {}"]));

    whole_log_pass(&install);

    let order = enumerated_stems(&install.root().join("mods/dev"), "gsc", "main.gsc");
    assert_eq!(order.len(), 2);
    let dispatcher = install.read_output("mods/dev", "main.gsc");
    assert_eq!(
        String::from_utf8(dispatcher).unwrap(),
        dispatcher_source(CASE, DEFAULT, &case_region(&order))
    );
}

#[test]
fn test_outputs_receive_identical_records() {
    let install = TestInstall::new("mods/dev", &["mods/a", "mods/b", "mods/c"]);
    install.append_log(&console_dump(None, "maps/mp/x.gsc", &["x();"]));

    let report = whole_log_pass(&install);

    assert_eq!(report.written.len(), 3);
    let first = install.read_output("mods/a", "maps/mp/x.gsc");
    for output in ["mods/b", "mods/c"] {
        assert_eq!(install.read_output(output, "maps/mp/x.gsc"), first);
    }
}

#[test]
fn test_dispatcher_is_stored_in_legacy_code_page() {
    let install = TestInstall::new("mods/dev", &["mods/dev"]);
    let source = dispatcher_source(CASE, DEFAULT, "").replacen(
        "main(name)",
        "// Mapa: Žilina\r\nmain(name)",
        1,
    );
    install.write_output("mods/dev", "main.gsc", &source);
    install.append_log(&console_dump(Some("main.gsc"), "a.gsc", &["a() {}"]));

    whole_log_pass(&install);

    let bytes = install.read_output("mods/dev", "main.gsc");
    assert!(String::from_utf8(bytes.clone()).is_err());
    let (decoded, _, had_errors) = encoding_rs::WINDOWS_1250.decode(&bytes);
    assert!(!had_errors);
    assert!(decoded.contains("// Mapa: Žilina"));
    assert!(decoded.contains("{case \"a\":\ndefault:\n}"));
}

#[test]
fn test_repeated_passes_reach_fixed_point() {
    let install = TestInstall::new("mods/dev", &["mods/dev"]);
    install.write_output("mods/dev", "main.gsc", dispatcher_source(CASE, DEFAULT, ""));
    install.append_log(&console_dump(Some("main.gsc"), "a.gsc", &["a() {}"]));

    let first = whole_log_pass(&install);
    let after_first = install.read_output("mods/dev", "main.gsc");
    let second = whole_log_pass(&install);

    assert!(first.dispatchers[0].report.changed);
    assert!(!second.dispatchers[0].report.changed);
    assert_eq!(install.read_output("mods/dev", "main.gsc"), after_first);
}

// =============================================================================
// Watcher on the real log file
// =============================================================================

#[test]
fn test_watcher_processes_only_new_dumps() {
    let install = TestInstall::new("mods/dev", &["mods/dev"]);
    install.write_output("mods/dev", "maps/main.gsc", dispatcher_source(CASE, DEFAULT, ""));
    install.append_log(&console_dump(Some("maps/main.gsc"), "maps/before.gsc", &["old"]));
    set_log_mtime(&install, 1_000);

    let source = FsLogSource::new(install.log_path());
    let mut watcher = LogWatcher::new(config_for(&install), source, SystemClock);
    assert!(watcher.prime().unwrap());
    assert_eq!(watcher.poll_once().unwrap(), PollEvent::Unchanged);

    install.append_log(&console_dump(Some("maps/main.gsc"), "maps/after.gsc", &["new"]));
    set_log_mtime(&install, 2_000);

    let PollEvent::Processed(report) = watcher.poll_once().unwrap() else {
        panic!("expected a pass after the log changed");
    };
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].path.as_str(), "maps/after.gsc");
    assert!(!install.root().join("mods/dev/maps/before.gsc").exists());
    install.assert_file_contains("mods/dev/maps/main.gsc", "{case \"after\":\ndefault:\n}");

    assert_eq!(watcher.poll_once().unwrap(), PollEvent::Unchanged);
}
