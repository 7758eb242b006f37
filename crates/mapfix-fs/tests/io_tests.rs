use mapfix_fs::{Error, LogOpen, io};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("maps").join("mp").join("a.gsc");

    io::write_atomic(&path, b"hello world").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a.gsc");
    fs::write(&path, "original").unwrap();

    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    io::write_text(&temp.path().join("a.gsc"), "x").unwrap();

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["a.gsc".to_string()]);
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let result = io::read_text(&temp.path().join("missing.gsc"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn test_legacy_write_uses_code_page() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("main.gsc");

    let encoded = io::encode_legacy(&path, "case \"ą\":\n").unwrap();
    io::write_atomic(&path, &encoded).unwrap();

    let bytes = io::read_bytes(&path).unwrap();
    assert_eq!(bytes, b"case \"\xB9\":\n".to_vec());
    assert_eq!(io::decode_legacy(&bytes), "case \"ą\":\n");
}

#[test]
fn test_legacy_write_rejects_unmappable_and_keeps_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("main.gsc");
    fs::write(&path, "original").unwrap();

    let result = io::encode_legacy(&path, "snowman ☃");

    assert!(matches!(result, Err(Error::Unencodable { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
}

#[test]
fn test_open_log_reads_whole_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("games_mp.log");
    fs::write(&path, "line 1\nline 2\n").unwrap();

    assert_eq!(
        io::open_log(&path).unwrap(),
        LogOpen::Readable("line 1\nline 2\n".to_string())
    );
}

#[test]
fn test_open_log_missing_file_is_error() {
    let temp = TempDir::new().unwrap();
    assert!(io::open_log(&temp.path().join("games_mp.log")).is_err());
}

#[cfg(not(windows))]
#[test]
fn test_open_log_reports_exclusive_holder_as_locked() {
    use fs2::FileExt;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("games_mp.log");
    fs::write(&path, "in game").unwrap();

    let holder = fs::File::open(&path).unwrap();
    FileExt::lock_exclusive(&holder).unwrap();

    assert_eq!(io::open_log(&path).unwrap(), LogOpen::Locked);

    FileExt::unlock(&holder).unwrap();
    assert!(matches!(io::open_log(&path).unwrap(), LogOpen::Readable(_)));
}
