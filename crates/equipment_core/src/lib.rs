//! Core domain logic for the equipment manager.
//! This crate is the single source of truth for equipment invariants,
//! undo/redo history, the filtered view and the selection.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, UserPrefs};
pub use logging::{
    default_log_level, init_logging, init_logging_from_prefs, logging_status, LoggingError,
};
pub use model::equipment::Equipment;
pub use model::fields::{Address, Date, EquipmentValidationError, Name, Phone, SerialNumber, Tag};
pub use model::manager::{EquipmentError, EquipmentManager, Snapshot};
pub use model::tag::TagSet;
pub use repo::json_storage::{
    DataConversionError, EquipmentStorage, JsonEquipmentStorage, StorageError, StorageResult,
};
pub use service::model_manager::{ModelError, ModelManager, ModelResult};
pub use store::change::{ListChange, ObserverId};
pub use store::filtered::{has_tag, name_contains_keywords, show_all, EquipmentPredicate};
pub use store::selection::SelectionError;
pub use store::versioned::{HistoryError, VersionedEquipmentManager};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
