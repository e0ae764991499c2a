//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ExpenseError;

/// Read a UTF-8 text file, returning `None` if it doesn't exist
///
/// A missing file is "no data yet". Any other failure (permissions, a
/// directory in the way, bytes that are not UTF-8) is reported as an error so
/// that unreadable data is never mistaken for an empty store.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<Option<String>, ExpenseError> {
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ExpenseError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    String::from_utf8(bytes).map(Some).map_err(|e| {
        ExpenseError::Storage(format!(
            "{} is not valid UTF-8 (byte {}), refusing to load it",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })
}

/// Temp file used while atomically replacing `path`
pub fn temp_path_for(path: &Path) -> Result<PathBuf, ExpenseError> {
    let name = path.file_name().ok_or_else(|| {
        ExpenseError::Storage(format!("Not a file path: {}", path.display()))
    })?;
    let mut temp_name = OsString::from(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Write a file atomically (write to temp, then rename)
///
/// The `write` callback fills the temp file. The destination is either
/// completely replaced or left untouched, even on crashes or power failures.
pub fn write_atomic<P, F>(path: P, write: F) -> Result<(), ExpenseError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = temp_path_for(path)?;

    let file = File::create(&temp_path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = write(&mut writer)
        .and_then(|_| writer.flush())
        .and_then(|_| writer.get_ref().sync_all());

    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(ExpenseError::Storage(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }
    drop(writer);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ExpenseError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Write a string to a file atomically
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), ExpenseError> {
    write_atomic(path, |w| w.write_all(contents.as_bytes()))
}
