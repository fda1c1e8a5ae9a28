//! JSON file read/write helpers shared by data and preference storage.
//!
//! # Invariants
//! - Reads distinguish "file missing" (`Ok(None)`) from read/parse failures.
//! - Writes go to a sibling temporary file that is synced and renamed into
//!   place, so readers never see a half-written document.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum JsonFileError {
    Io(io::Error),
    Parse(serde_json::Error),
}

/// Reads and decodes `path`. Returns `Ok(None)` when the file does not exist.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, JsonFileError> {
    // Bytes, not text: invalid UTF-8 must surface as a parse error.
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(JsonFileError::Io(err)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(JsonFileError::Parse)
}

/// Encodes `value` as pretty JSON and atomically replaces `path`.
///
/// Missing parent directories are created.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    bytes.push(b'\n');

    let temp_path = temp_path_for(path);
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".tmp");
    path.with_file_name(name)
}
