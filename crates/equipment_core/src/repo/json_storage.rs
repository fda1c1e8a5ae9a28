//! Equipment storage contract and JSON file implementation.
//!
//! # Responsibility
//! - Load a full equipment collection from a JSON document.
//! - Save a full collection as a round-trippable JSON document.
//!
//! # Invariants
//! - `read_equipment_manager` returns `Ok(None)` only when the file is absent.
//! - Malformed JSON, invalid field values and duplicate serial numbers all
//!   surface as `DataConversionError`.
//! - `save` followed by `read` yields a collection equal to the one saved.

use super::json_file::{read_json_file, write_json_file, JsonFileError};
use crate::model::equipment::Equipment;
use crate::model::manager::{EquipmentError, EquipmentManager};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type StorageResult<T> = Result<T, StorageError>;

/// The file exists but does not hold a valid equipment document.
#[derive(Debug)]
pub enum DataConversionError {
    /// Not JSON, wrong structure, or a field failed validation.
    Malformed(serde_json::Error),
    /// Structurally valid, but the records violate collection invariants.
    InvalidData(EquipmentError),
}

impl Display for DataConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed equipment document: {err}"),
            Self::InvalidData(err) => write!(f, "invalid equipment data: {err}"),
        }
    }
}

impl Error for DataConversionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::InvalidData(err) => Some(err),
        }
    }
}

/// Storage-level failure.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    DataConversion(DataConversionError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "equipment storage i/o failed: {err}"),
            Self::DataConversion(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::DataConversion(err) => Some(err),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DataConversionError> for StorageError {
    fn from(value: DataConversionError) -> Self {
        Self::DataConversion(value)
    }
}

impl From<JsonFileError> for StorageError {
    fn from(value: JsonFileError) -> Self {
        match value {
            JsonFileError::Io(err) => Self::Io(err),
            JsonFileError::Parse(err) => Self::DataConversion(DataConversionError::Malformed(err)),
        }
    }
}

/// Storage interface for whole-collection load/save.
pub trait EquipmentStorage {
    /// Default file used by `read_default` and `save_default`.
    fn file_path(&self) -> &Path;

    fn read_equipment_manager(&self, path: &Path) -> StorageResult<Option<EquipmentManager>>;

    fn save_equipment_manager(&self, manager: &EquipmentManager, path: &Path)
        -> StorageResult<()>;

    fn read_default(&self) -> StorageResult<Option<EquipmentManager>> {
        self.read_equipment_manager(self.file_path())
    }

    fn save_default(&self, manager: &EquipmentManager) -> StorageResult<()> {
        self.save_equipment_manager(manager, self.file_path())
    }
}

#[derive(Deserialize)]
struct EquipmentDocument {
    equipment: Vec<Equipment>,
}

#[derive(Serialize)]
struct EquipmentDocumentRef<'a> {
    equipment: &'a [Equipment],
}

/// JSON file-backed equipment storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonEquipmentStorage {
    file_path: PathBuf,
}

impl JsonEquipmentStorage {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl EquipmentStorage for JsonEquipmentStorage {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_equipment_manager(&self, path: &Path) -> StorageResult<Option<EquipmentManager>> {
        let started_at = Instant::now();
        let result = read_document(path);
        match &result {
            Ok(Some(manager)) => info!(
                "event=storage_read module=repo status=ok duration_ms={} records={}",
                started_at.elapsed().as_millis(),
                manager.len()
            ),
            Ok(None) => info!(
                "event=storage_read module=repo status=ok duration_ms={} records=0 file_missing=true",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=storage_read module=repo status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                error_code(err),
                err
            ),
        }
        result
    }

    fn save_equipment_manager(
        &self,
        manager: &EquipmentManager,
        path: &Path,
    ) -> StorageResult<()> {
        let started_at = Instant::now();
        let document = EquipmentDocumentRef {
            equipment: manager.equipment(),
        };
        match write_json_file(path, &document) {
            Ok(()) => {
                info!(
                    "event=storage_save module=repo status=ok duration_ms={} records={}",
                    started_at.elapsed().as_millis(),
                    manager.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=storage_save module=repo status=error duration_ms={} error_code=write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

fn read_document(path: &Path) -> StorageResult<Option<EquipmentManager>> {
    let Some(document) = read_json_file::<EquipmentDocument>(path)? else {
        return Ok(None);
    };
    let manager = EquipmentManager::from_equipment(document.equipment)
        .map_err(DataConversionError::InvalidData)?;
    Ok(Some(manager))
}

fn error_code(err: &StorageError) -> &'static str {
    match err {
        StorageError::Io(_) => "read_failed",
        StorageError::DataConversion(DataConversionError::Malformed(_)) => "malformed_document",
        StorageError::DataConversion(DataConversionError::InvalidData(_)) => "invalid_data",
    }
}
