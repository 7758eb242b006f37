//! Atomic I/O operations, legacy encodings and shared log access

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use encoding_rs::{Encoding, WINDOWS_1250};
use fs2::FileExt;

use crate::{Error, Result};

/// Code page the game's script engine reads dispatcher files with.
pub static LEGACY_ENCODING: &Encoding = WINDOWS_1250;

/// Outcome of opening the game log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOpen {
    /// The whole log, decoded lossily as UTF-8.
    Readable(String),
    /// The producing process holds the file exclusively right now.
    Locked,
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Missing parent directories are created first.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    FileExt::lock_exclusive(&temp_file)
        .map_err(|_| Error::LockFailed { path: path.to_path_buf() })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    FileExt::unlock(&temp_file)
        .map_err(|_| Error::LockFailed { path: path.to_path_buf() })?;
    drop(temp_file);

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

    tracing::trace!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Read UTF-8 text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read raw bytes from a file.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Write UTF-8 text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Decode bytes that were written either by a UTF-8 editor or by this tool.
///
/// Valid UTF-8 (with or without BOM) wins; anything else is read as
/// [`LEGACY_ENCODING`].
pub fn decode_legacy(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => {
            let (text, _, _) = LEGACY_ENCODING.decode(bytes);
            text.into_owned()
        }
    }
}

/// Encode `content` with [`LEGACY_ENCODING`], refusing unmappable characters.
///
/// `path` only names the destination in the error.
pub fn encode_legacy(path: &Path, content: &str) -> Result<Vec<u8>> {
    let (bytes, _, unmappable) = LEGACY_ENCODING.encode(content);
    if unmappable {
        return Err(Error::Unencodable {
            path: path.to_path_buf(),
            encoding: LEGACY_ENCODING.name(),
        });
    }
    Ok(bytes.into_owned())
}

/// Open the game log for reading while letting the producer keep appending,
/// renaming or deleting it.
///
/// A sharing violation (Windows) or a contended advisory lock (elsewhere) is
/// reported as [`LogOpen::Locked`] rather than as an error.
pub fn open_log(path: &Path) -> Result<LogOpen> {
    let mut file = match open_shared(path) {
        Ok(file) => file,
        Err(e) if is_sharing_violation(&e) => return Ok(LogOpen::Locked),
        Err(e) => return Err(Error::io(path, e)),
    };

    #[cfg(not(windows))]
    {
        match FileExt::try_lock_shared(&file) {
            Ok(()) => {}
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                return Ok(LogOpen::Locked);
            }
            Err(e) => return Err(Error::io(path, e)),
        }
    }

    let mut bytes = Vec::new();
    let read = file.read_to_end(&mut bytes);

    #[cfg(not(windows))]
    if let Err(e) = FileExt::unlock(&file) {
        tracing::debug!(path = %path.display(), error = %e, "failed to release log lock");
    }

    match read {
        Ok(_) => Ok(LogOpen::Readable(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if is_sharing_violation(&e) => Ok(LogOpen::Locked),
        Err(e) => Err(Error::io(path, e)),
    }
}

#[cfg(windows)]
fn open_shared(path: &Path) -> std::io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;

    const FILE_SHARE_DELETE: u32 = 0x0000_0004;
    OpenOptions::new()
        .read(true)
        .share_mode(FILE_SHARE_DELETE)
        .open(path)
}

#[cfg(not(windows))]
fn open_shared(path: &Path) -> std::io::Result<File> {
    File::open(path)
}

#[cfg(windows)]
fn is_sharing_violation(e: &std::io::Error) -> bool {
    const ERROR_SHARING_VIOLATION: i32 = 32;
    const ERROR_LOCK_VIOLATION: i32 = 33;
    matches!(
        e.raw_os_error(),
        Some(ERROR_SHARING_VIOLATION) | Some(ERROR_LOCK_VIOLATION)
    )
}

#[cfg(not(windows))]
fn is_sharing_violation(e: &std::io::Error) -> bool {
    e.kind() == std::io::ErrorKind::WouldBlock
}
