//! Selected-equipment tracking over the filtered view.
//!
//! # Responsibility
//! - Hold the single selected record, if any.
//! - Repair the selection after each view change so it never points at a
//!   record that left the view.
//!
//! # Invariants
//! - An empty selection is always valid and never auto-filled.
//! - Explicit selection requires an exact match in the current view.
//! - Reconciliation never fails; it only re-points or clears.

use crate::model::equipment::Equipment;
use crate::model::fields::SerialNumber;
use crate::store::change::{ListChange, ObserverId, Observers};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Callback receiving the selection after it changed.
pub type SelectionObserver = dyn FnMut(Option<&Equipment>);

/// Explicit selection of a record outside the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    InvalidSelection(SerialNumber),
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSelection(serial) => write!(
                f,
                "equipment `{serial}` is not in the current filtered list"
            ),
        }
    }
}

impl Error for SelectionError {}

#[derive(Default)]
pub struct SelectionTracker {
    selected: Option<Equipment>,
    observers: Observers<SelectionObserver>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Equipment> {
        self.selected.as_ref()
    }

    /// Selects `equipment` (or clears with `None`) and notifies observers.
    ///
    /// # Errors
    /// - `InvalidSelection` when `equipment` is not present in `view`.
    pub fn set_selection(
        &mut self,
        equipment: Option<Equipment>,
        view: &[Equipment],
    ) -> Result<(), SelectionError> {
        if let Some(candidate) = &equipment {
            if !view.contains(candidate) {
                return Err(SelectionError::InvalidSelection(
                    candidate.serial_number.clone(),
                ));
            }
        }
        self.selected = equipment;
        self.publish();
        Ok(())
    }

    /// Applies one view change to the selection. Returns whether the
    /// selection changed.
    ///
    /// `view` is the view contents after the change.
    pub fn reconcile(&mut self, change: &ListChange, view: &[Equipment]) -> bool {
        let Some(current) = &self.selected else {
            return false;
        };

        if change.is_same_size_replacement() {
            if let Some(offset) = change.removed.iter().position(|removed| removed == current) {
                let next = change.added[offset].clone();
                return self.repoint(Some(next), "replaced");
            }
        }

        let was_removed = change
            .removed
            .iter()
            .any(|removed| removed.is_same(current));
        if was_removed {
            let predecessor = change
                .from
                .checked_sub(1)
                .and_then(|index| view.get(index))
                .cloned();
            return self.repoint(predecessor, "removed");
        }

        false
    }

    fn repoint(&mut self, next: Option<Equipment>, reason: &str) -> bool {
        if self.selected == next {
            return false;
        }
        debug!(
            "event=selection_repoint module=store status=ok reason={} selected={}",
            reason,
            next.as_ref()
                .map(|equipment| equipment.serial_number.as_str())
                .unwrap_or("none")
        );
        self.selected = next;
        true
    }

    pub fn subscribe(&mut self, observer: Box<SelectionObserver>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Delivers the current selection to every observer.
    pub fn publish(&mut self) {
        let selected = self.selected.as_ref();
        self.observers.for_each(|observer| observer(selected));
    }
}

impl std::fmt::Debug for SelectionTracker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionTracker")
            .field("selected", &self.selected)
            .field("observers", &self.observers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionError, SelectionTracker};
    use crate::model::equipment::Equipment;
    use crate::model::tag::TagSet;
    use crate::store::change::ListChange;

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
    fn empty_selection_is_left_alone() {
        let mut tracker = SelectionTracker::new();
        let a = item("A", "S1");
        let change = ListChange::between(&[a.clone()], &[]).unwrap();
        assert!(!tracker.reconcile(&change, &[]));
        assert!(tracker.selected().is_none());
    }

    #[test]
    fn set_selection_rejects_record_outside_view() {
        let mut tracker = SelectionTracker::new();
        let (a, b) = (item("A", "S1"), item("B", "S2"));
        let err = tracker
            .set_selection(Some(b.clone()), &[a.clone()])
            .unwrap_err();
        assert_eq!(err, SelectionError::InvalidSelection(b.serial_number));
        assert!(tracker.selected().is_none());

        tracker.set_selection(Some(a.clone()), &[a.clone()]).unwrap();
        assert_eq!(tracker.selected(), Some(&a));
        tracker.set_selection(None, &[]).unwrap();
        assert!(tracker.selected().is_none());
    }

    #[test]
    fn mixed_size_change_falls_back_to_predecessor() {
        let (a, b, c) = (item("A", "S1"), item("B", "S2"), item("C", "S3"));
        let edited_b = item("B edited", "S2");
        let old = vec![a.clone(), b.clone(), c.clone()];
        let new = vec![a.clone(), edited_b];
        let mut tracker = SelectionTracker::new();
        tracker.set_selection(Some(b), &old).unwrap();

        let change = ListChange::between(&old, &new).unwrap();
        assert!(change.was_replaced());
        assert!(!change.is_same_size_replacement());
        assert!(tracker.reconcile(&change, &new));
        assert_eq!(tracker.selected(), Some(&a));
    }

    #[test]
    fn unrelated_change_keeps_selection() {
        let (a, b, c) = (item("A", "S1"), item("B", "S2"), item("C", "S3"));
        let old = vec![a.clone(), b.clone(), c];
        let new = vec![a.clone(), b];
        let mut tracker = SelectionTracker::new();
        tracker.set_selection(Some(a.clone()), &old).unwrap();

        let change = ListChange::between(&old, &new).unwrap();
        assert!(!tracker.reconcile(&change, &new));
        assert_eq!(tracker.selected(), Some(&a));
    }
}
