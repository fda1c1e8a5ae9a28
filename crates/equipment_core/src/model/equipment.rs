//! Equipment domain record.
//!
//! # Responsibility
//! - Define the canonical record tracked by the equipment manager.
//! - Separate identity (`is_same`) from full equality (`==`).
//!
//! # Invariants
//! - Identity is the serial number; two records with the same serial number
//!   are "the same" equipment even when other fields differ.
//! - Every field is a validated value type, so a constructed record is always
//!   well-formed.

use super::fields::{Address, Date, Name, Phone, SerialNumber, Tag};
use super::tag::TagSet;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Canonical equipment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: Name,
    pub phone: Phone,
    /// Next scheduled maintenance date.
    pub date: Date,
    pub address: Address,
    /// Identity key. See [`Equipment::is_same`].
    pub serial_number: SerialNumber,
    #[serde(default)]
    pub tags: TagSet,
}

impl Equipment {
    pub fn new(
        name: Name,
        phone: Phone,
        date: Date,
        address: Address,
        serial_number: SerialNumber,
        tags: TagSet,
    ) -> Self {
        Self {
            name,
            phone,
            date,
            address,
            serial_number,
            tags,
        }
    }

    /// Returns whether `other` refers to the same physical equipment.
    ///
    /// Weaker than `==`: only the serial number is compared.
    pub fn is_same(&self, other: &Equipment) -> bool {
        self.serial_number == other.serial_number
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

impl Display for Equipment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Phone: {} Date: {} Address: {} Serial Number: {} Tags: ",
            self.name, self.phone, self.date, self.address, self.serial_number
        )?;
        for tag in &self.tags {
            write!(f, "[{tag}]")?;
        }
        Ok(())
    }
}
