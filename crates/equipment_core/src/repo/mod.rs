//! Persistence boundary for equipment data.
//!
//! # Responsibility
//! - Define the storage contract used to load and save a full collection.
//! - Keep JSON document details inside the persistence boundary.
//!
//! # Invariants
//! - A missing data file means "no prior state", not an error.
//! - Loaded data is validated before a collection is returned; invalid
//!   documents surface as `DataConversionError` and are never repaired.

pub(crate) mod json_file;
pub mod json_storage;
