//! Equipment domain model.
//!
//! # Responsibility
//! - Define the record type, its validated fields, and the unique collection.
//! - Keep identity (`is_same`) and full equality rules in one place.
//!
//! # Invariants
//! - Serial number is the identity key of every record.
//! - A collection never holds two records with the same identity.

pub mod equipment;
pub mod fields;
pub mod manager;
pub mod tag;
