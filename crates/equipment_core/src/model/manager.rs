//! Equipment collection aggregate and immutable snapshots.
//!
//! # Responsibility
//! - Own the ordered equipment list and enforce identity uniqueness.
//! - Provide snapshot capture/restore used by the versioned store.
//!
//! # Invariants
//! - No two elements satisfy `Equipment::is_same`.
//! - Every mutator either fully applies or returns an error with the list
//!   unchanged.

use super::equipment::Equipment;
use super::fields::{SerialNumber, Tag};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identity-level failure for collection mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipmentError {
    /// Another record already uses this serial number.
    Duplicate(SerialNumber),
    /// No record with this serial number exists.
    NotFound(SerialNumber),
}

impl Display for EquipmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate(serial) => {
                write!(f, "equipment with serial number `{serial}` already exists")
            }
            Self::NotFound(serial) => {
                write!(f, "equipment with serial number `{serial}` not found")
            }
        }
    }
}

impl Error for EquipmentError {}

/// Immutable copy of a collection state.
///
/// Two snapshots are equal iff their ordered record sequences are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    equipment: Vec<Equipment>,
}

impl Snapshot {
    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn len(&self) -> usize {
        self.equipment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty()
    }
}

/// Ordered, identity-unique list of equipment records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentManager {
    equipment: Vec<Equipment>,
}

impl EquipmentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from `equipment`, rejecting identity duplicates.
    pub fn from_equipment(equipment: Vec<Equipment>) -> Result<Self, EquipmentError> {
        let mut manager = Self::new();
        manager.set_all(equipment)?;
        Ok(manager)
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            equipment: snapshot.equipment.clone(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            equipment: self.equipment.clone(),
        }
    }

    /// Replaces the whole list with the snapshot contents.
    pub fn reset_data(&mut self, snapshot: &Snapshot) {
        self.equipment.clone_from(&snapshot.equipment);
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn len(&self) -> usize {
        self.equipment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty()
    }

    /// Returns whether a record with the same identity exists.
    pub fn contains(&self, equipment: &Equipment) -> bool {
        self.position_of(equipment).is_some()
    }

    /// Index of the record with the same identity as `equipment`.
    pub fn position_of(&self, equipment: &Equipment) -> Option<usize> {
        self.equipment
            .iter()
            .position(|existing| existing.is_same(equipment))
    }

    /// Appends `equipment`.
    ///
    /// # Errors
    /// - `Duplicate` when a record with the same identity exists.
    pub fn add(&mut self, equipment: Equipment) -> Result<(), EquipmentError> {
        if self.contains(&equipment) {
            return Err(EquipmentError::Duplicate(equipment.serial_number));
        }
        self.equipment.push(equipment);
        Ok(())
    }

    /// Removes the record with the same identity as `target` and returns it.
    ///
    /// # Errors
    /// - `NotFound` when no record matches.
    pub fn remove(&mut self, target: &Equipment) -> Result<Equipment, EquipmentError> {
        let index = self
            .position_of(target)
            .ok_or_else(|| EquipmentError::NotFound(target.serial_number.clone()))?;
        Ok(self.equipment.remove(index))
    }

    /// Replaces the record matching `target` by identity with `edited`,
    /// keeping its position.
    ///
    /// # Errors
    /// - `NotFound` when `target` is absent.
    /// - `Duplicate` when `edited` collides with a different record.
    pub fn set_equipment(
        &mut self,
        target: &Equipment,
        edited: Equipment,
    ) -> Result<(), EquipmentError> {
        let index = self
            .position_of(target)
            .ok_or_else(|| EquipmentError::NotFound(target.serial_number.clone()))?;

        let collides = self
            .equipment
            .iter()
            .enumerate()
            .any(|(other, existing)| other != index && existing.is_same(&edited));
        if collides {
            return Err(EquipmentError::Duplicate(edited.serial_number));
        }

        self.equipment[index] = edited;
        Ok(())
    }

    /// Removes `tag` from every record. Returns the number of records changed.
    pub fn remove_tag(&mut self, tag: &Tag) -> usize {
        let mut changed = 0;
        for equipment in &mut self.equipment {
            if equipment.tags.remove(tag) {
                changed += 1;
            }
        }
        changed
    }

    /// Replaces the whole list.
    ///
    /// # Errors
    /// - `Duplicate` when `equipment` contains an identity pair; the current
    ///   list is left unchanged.
    pub fn set_all(&mut self, equipment: Vec<Equipment>) -> Result<(), EquipmentError> {
        for (index, candidate) in equipment.iter().enumerate() {
            if equipment[..index]
                .iter()
                .any(|earlier| earlier.is_same(candidate))
            {
                return Err(EquipmentError::Duplicate(candidate.serial_number.clone()));
            }
        }
        self.equipment = equipment;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EquipmentError, EquipmentManager};
    use crate::model::equipment::Equipment;
    use crate::model::tag::TagSet;

    fn equipment(name: &str, serial: &str, tags: &[&str]) -> Equipment {
        Equipment::new(
            name.parse().unwrap(),
            "62353535".parse().unwrap(),
            "01-05-2019".parse().unwrap(),
            "Ang Mo Kio Ave 8".parse().unwrap(),
            serial.parse().unwrap(),
            tags.iter().map(|tag| tag.parse().unwrap()).collect::<TagSet>(),
        )
    }

    #[test]
    fn add_rejects_identity_duplicate_without_partial_insert() {
        let mut manager = EquipmentManager::new();
        manager.add(equipment("Pump", "SN1", &[])).unwrap();

        let err = manager
            .add(equipment("Other name", "SN1", &["west"]))
            .unwrap_err();
        assert!(matches!(err, EquipmentError::Duplicate(_)));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.equipment()[0].name.as_str(), "Pump");
    }

    #[test]
    fn set_equipment_keeps_position_and_allows_same_identity() {
        let mut manager = EquipmentManager::from_equipment(vec![
            equipment("Pump", "SN1", &[]),
            equipment("Valve", "SN2", &[]),
        ])
        .unwrap();
        let target = manager.equipment()[0].clone();

        manager
            .set_equipment(&target, equipment("Pump Mk2", "SN1", &[]))
            .unwrap();
        assert_eq!(manager.equipment()[0].name.as_str(), "Pump Mk2");
        assert_eq!(manager.equipment()[1].name.as_str(), "Valve");
    }

    #[test]
    fn set_equipment_rejects_collision_with_other_record() {
        let mut manager = EquipmentManager::from_equipment(vec![
            equipment("Pump", "SN1", &[]),
            equipment("Valve", "SN2", &[]),
        ])
        .unwrap();
        let before = manager.clone();
        let target = manager.equipment()[0].clone();

        let err = manager
            .set_equipment(&target, equipment("Pump", "SN2", &[]))
            .unwrap_err();
        assert!(matches!(err, EquipmentError::Duplicate(_)));
        assert_eq!(manager, before);
    }

    #[test]
    fn remove_missing_reports_not_found() {
        let mut manager = EquipmentManager::new();
        let err = manager.remove(&equipment("Pump", "SN1", &[])).unwrap_err();
        assert!(matches!(err, EquipmentError::NotFound(_)));
    }

    #[test]
    fn remove_tag_strips_every_record() {
        let mut manager = EquipmentManager::from_equipment(vec![
            equipment("Pump", "SN1", &["west", "urgent"]),
            equipment("Valve", "SN2", &["east"]),
            equipment("Hose", "SN3", &["west"]),
        ])
        .unwrap();

        let changed = manager.remove_tag(&"west".parse().unwrap());
        assert_eq!(changed, 2);
        assert!(manager
            .equipment()
            .iter()
            .all(|item| !item.has_tag(&"west".parse().unwrap())));
        assert_eq!(manager.remove_tag(&"missing".parse().unwrap()), 0);
    }

    #[test]
    fn from_equipment_rejects_duplicates() {
        let err = EquipmentManager::from_equipment(vec![
            equipment("Pump", "SN1", &[]),
            equipment("Pump copy", "SN1", &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, EquipmentError::Duplicate(_)));
    }
}
