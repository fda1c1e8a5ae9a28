//! Versioned equipment store with linear undo/redo history.
//!
//! # Responsibility
//! - Own the live working collection and its snapshot history.
//! - Keep mutation and commit separate so several mutations can form one
//!   undo step.
//!
//! # Invariants
//! - `history` is never empty and `cursor < history.len()`.
//! - `commit` is the only operation that appends to `history`; it discards
//!   every snapshot after the cursor first.
//! - `undo`/`redo` only move the cursor and restore the working collection.
//! - A failed call leaves working state, history and cursor unchanged.

use crate::model::equipment::Equipment;
use crate::model::fields::Tag;
use crate::model::manager::{EquipmentError, EquipmentManager, Snapshot};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// History boundary failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    NoUndoableState,
    NoRedoableState,
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoUndoableState => write!(f, "no undoable state"),
            Self::NoRedoableState => write!(f, "no redoable state"),
        }
    }
}

impl Error for HistoryError {}

/// Equipment collection plus snapshot history and cursor.
#[derive(Debug, Clone)]
pub struct VersionedEquipmentManager {
    working: EquipmentManager,
    history: Vec<Snapshot>,
    cursor: usize,
}

impl VersionedEquipmentManager {
    /// Wraps `initial` with a single-entry history (cursor 0).
    pub fn new(initial: EquipmentManager) -> Self {
        let history = vec![initial.snapshot()];
        Self {
            working: initial,
            history,
            cursor: 0,
        }
    }

    /// Live working collection.
    pub fn equipment_manager(&self) -> &EquipmentManager {
        &self.working
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Snapshot at the cursor.
    pub fn current_snapshot(&self) -> &Snapshot {
        &self.history[self.cursor]
    }

    /// Replaces the working collection in place. History is untouched.
    pub fn reset_data(&mut self, snapshot: &Snapshot) {
        self.working.reset_data(snapshot);
    }

    pub fn has_equipment(&self, equipment: &Equipment) -> bool {
        self.working.contains(equipment)
    }

    pub fn add(&mut self, equipment: Equipment) -> Result<(), EquipmentError> {
        self.working.add(equipment)
    }

    pub fn remove(&mut self, target: &Equipment) -> Result<Equipment, EquipmentError> {
        self.working.remove(target)
    }

    pub fn replace(
        &mut self,
        target: &Equipment,
        replacement: Equipment,
    ) -> Result<(), EquipmentError> {
        self.working.set_equipment(target, replacement)
    }

    /// Removes `tag` from every record. Never fails.
    pub fn remove_tag(&mut self, tag: &Tag) -> usize {
        self.working.remove_tag(tag)
    }

    /// Records the working collection as a new history entry after the cursor.
    pub fn commit(&mut self) {
        let discarded = self.history.len() - self.cursor - 1;
        self.history.truncate(self.cursor + 1);
        self.history.push(self.working.snapshot());
        self.cursor += 1;
        debug!(
            "event=store_commit module=store status=ok cursor={} history_len={} discarded_redo={}",
            self.cursor,
            self.history.len(),
            discarded
        );
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.history.len() - 1
    }

    /// Steps back one history entry and restores it as the working state.
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        if !self.can_undo() {
            return Err(HistoryError::NoUndoableState);
        }
        self.cursor -= 1;
        self.working.reset_data(&self.history[self.cursor]);
        debug!(
            "event=store_undo module=store status=ok cursor={}",
            self.cursor
        );
        Ok(())
    }

    /// Steps forward one history entry and restores it as the working state.
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        if !self.can_redo() {
            return Err(HistoryError::NoRedoableState);
        }
        self.cursor += 1;
        self.working.reset_data(&self.history[self.cursor]);
        debug!(
            "event=store_redo module=store status=ok cursor={}",
            self.cursor
        );
        Ok(())
    }
}

impl PartialEq for VersionedEquipmentManager {
    fn eq(&self, other: &Self) -> bool {
        self.working == other.working
            && self.history == other.history
            && self.cursor == other.cursor
    }
}

impl Eq for VersionedEquipmentManager {}

#[cfg(test)]
mod tests {
    use super::{HistoryError, VersionedEquipmentManager};
    use crate::model::equipment::Equipment;
    use crate::model::manager::EquipmentManager;
    use crate::model::tag::TagSet;

    fn item(name: &str, serial: &str) -> Equipment {
        Equipment::new(
            name.parse().unwrap(),
            "999".parse().unwrap(),
            "01-01-2020".parse().unwrap(),
            "Depot 1".parse().unwrap(),
            serial.parse().unwrap(),
            TagSet::new(),
        )
    }

    #[test]
    fn new_store_has_single_entry_and_cannot_move() {
        let mut store = VersionedEquipmentManager::new(EquipmentManager::new());
        assert_eq!(store.history_len(), 1);
        assert_eq!(store.cursor(), 0);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert_eq!(store.undo(), Err(HistoryError::NoUndoableState));
        assert_eq!(store.redo(), Err(HistoryError::NoRedoableState));
    }

    #[test]
    fn mutations_without_commit_do_not_extend_history() {
        let mut store = VersionedEquipmentManager::new(EquipmentManager::new());
        store.add(item("A", "S1")).unwrap();
        store.add(item("B", "S2")).unwrap();
        assert_eq!(store.history_len(), 1);

        store.commit();
        assert_eq!(store.history_len(), 2);
        assert_eq!(store.current_snapshot().len(), 2);

        store.undo().unwrap();
        assert!(store.equipment_manager().is_empty());
    }

    #[test]
    fn commit_after_undo_truncates_redo_branch() {
        let mut store = VersionedEquipmentManager::new(EquipmentManager::new());
        store.add(item("A", "S1")).unwrap();
        store.commit();
        store.add(item("B", "S2")).unwrap();
        store.commit();

        store.undo().unwrap();
        store.undo().unwrap();
        assert!(store.can_redo());

        store.add(item("C", "S3")).unwrap();
        store.commit();
        assert_eq!(store.history_len(), 2);
        assert!(!store.can_redo());
        assert_eq!(store.redo(), Err(HistoryError::NoRedoableState));
    }

    #[test]
    fn reset_data_leaves_history_alone() {
        let mut store = VersionedEquipmentManager::new(EquipmentManager::new());
        let loaded = EquipmentManager::from_equipment(vec![item("A", "S1")]).unwrap();

        store.reset_data(&loaded.snapshot());
        assert_eq!(store.equipment_manager(), &loaded);
        assert_eq!(store.history_len(), 1);
        assert_eq!(store.cursor(), 0);
        assert!(store.current_snapshot().is_empty());
    }
}
