//! Model facade consumed by command and presentation layers.
//!
//! # Responsibility
//! - Own the versioned store, filtered view, selection and user preferences.
//! - Sequence every structural change: view refresh, selection repair, view
//!   observers, then selection observers.
//!
//! # Invariants
//! - When a mutator returns, view and selection already reflect the new data.
//! - A failed mutator changes nothing and notifies nobody.
//! - Only `commit` creates an undo step.

use crate::config::UserPrefs;
use crate::model::equipment::Equipment;
use crate::model::fields::Tag;
use crate::model::manager::{EquipmentError, EquipmentManager};
use crate::store::change::{ListChange, ObserverId};
use crate::store::filtered::{
    show_all, EquipmentPredicate, FilteredIter, FilteredView, ViewObserver,
};
use crate::store::selection::{SelectionError, SelectionObserver, SelectionTracker};
use crate::store::versioned::{HistoryError, VersionedEquipmentManager};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Facade-level error returned by `ModelManager` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    Equipment(EquipmentError),
    History(HistoryError),
    Selection(SelectionError),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equipment(err) => write!(f, "{err}"),
            Self::History(err) => write!(f, "{err}"),
            Self::Selection(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Equipment(err) => Some(err),
            Self::History(err) => Some(err),
            Self::Selection(err) => Some(err),
        }
    }
}

impl From<EquipmentError> for ModelError {
    fn from(value: EquipmentError) -> Self {
        Self::Equipment(value)
    }
}

impl From<HistoryError> for ModelError {
    fn from(value: HistoryError) -> Self {
        Self::History(value)
    }
}

impl From<SelectionError> for ModelError {
    fn from(value: SelectionError) -> Self {
        Self::Selection(value)
    }
}

pub type ModelResult<T> = Result<T, ModelError>;

/// In-memory model of the equipment manager.
#[derive(Debug)]
pub struct ModelManager {
    store: VersionedEquipmentManager,
    view: FilteredView,
    selection: SelectionTracker,
    user_prefs: UserPrefs,
}

impl ModelManager {
    pub fn new(initial: EquipmentManager, user_prefs: UserPrefs) -> Self {
        debug!(
            "event=model_init module=service status=ok records={} equipment_file={}",
            initial.len(),
            user_prefs.equipment_file_path.display()
        );
        let view = FilteredView::new(initial.equipment());
        Self {
            store: VersionedEquipmentManager::new(initial),
            view,
            selection: SelectionTracker::new(),
            user_prefs,
        }
    }

    pub fn user_prefs(&self) -> &UserPrefs {
        &self.user_prefs
    }

    pub fn set_user_prefs(&mut self, user_prefs: UserPrefs) {
        self.user_prefs = user_prefs;
    }

    pub fn equipment_file_path(&self) -> &Path {
        &self.user_prefs.equipment_file_path
    }

    pub fn set_equipment_file_path(&mut self, path: impl Into<PathBuf>) {
        self.user_prefs.equipment_file_path = path.into();
    }

    /// Replaces the working collection (e.g. after a reload). History is kept.
    pub fn set_equipment_manager(&mut self, data: &EquipmentManager) {
        self.store.reset_data(&data.snapshot());
        self.sync_view();
    }

    pub fn equipment_manager(&self) -> &EquipmentManager {
        self.store.equipment_manager()
    }

    pub fn has_equipment(&self, equipment: &Equipment) -> bool {
        self.store.has_equipment(equipment)
    }

    /// Adds `equipment` and resets the filter so the new record is visible.
    pub fn add_equipment(&mut self, equipment: Equipment) -> ModelResult<()> {
        let serial = equipment.serial_number.clone();
        self.store.add(equipment).map_err(|err| {
            warn!("event=equipment_add module=service status=error serial={serial} error={err}");
            err
        })?;
        debug!("event=equipment_add module=service status=ok serial={serial}");
        self.sync_view();
        self.update_filtered_equipment_list(show_all());
        Ok(())
    }

    pub fn delete_equipment(&mut self, target: &Equipment) -> ModelResult<()> {
        self.store.remove(target)?;
        debug!(
            "event=equipment_delete module=service status=ok serial={}",
            target.serial_number
        );
        self.sync_view();
        Ok(())
    }

    /// Replaces `target` (located by identity) with `edited`, in place.
    pub fn set_equipment(&mut self, target: &Equipment, edited: Equipment) -> ModelResult<()> {
        self.store.replace(target, edited)?;
        debug!(
            "event=equipment_update module=service status=ok serial={}",
            target.serial_number
        );
        self.sync_view();
        Ok(())
    }

    /// Removes `tag` from every record. Never fails.
    pub fn delete_tag(&mut self, tag: &Tag) {
        let changed = self.store.remove_tag(tag);
        debug!("event=tag_delete module=service status=ok tag={tag} records={changed}");
        if changed > 0 {
            self.sync_view();
        }
    }

    /// Live, restartable iterator over the filtered collection.
    pub fn filtered_equipment(&self) -> FilteredIter<'_> {
        self.view.iter(self.store.equipment_manager().equipment())
    }

    pub fn update_filtered_equipment_list(&mut self, predicate: EquipmentPredicate) {
        let source = self.store.equipment_manager().equipment();
        if let Some(change) = self.view.set_predicate(predicate, source) {
            self.dispatch(&change);
        }
    }

    pub fn subscribe_view(&mut self, observer: Box<ViewObserver>) -> ObserverId {
        self.view.subscribe(observer)
    }

    pub fn unsubscribe_view(&mut self, id: ObserverId) -> bool {
        self.view.unsubscribe(id)
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    pub fn undo(&mut self) -> ModelResult<()> {
        self.store.undo()?;
        self.sync_view();
        Ok(())
    }

    pub fn redo(&mut self) -> ModelResult<()> {
        self.store.redo()?;
        self.sync_view();
        Ok(())
    }

    /// Records the current collection as one undo step.
    pub fn commit(&mut self) {
        self.store.commit();
        info!(
            "event=model_commit module=service status=ok cursor={} records={}",
            self.store.cursor(),
            self.store.equipment_manager().len()
        );
    }

    pub fn selected_equipment(&self) -> Option<&Equipment> {
        self.selection.selected()
    }

    /// Selects a record from the current filtered view, or clears with `None`.
    pub fn set_selected_equipment(&mut self, equipment: Option<Equipment>) -> ModelResult<()> {
        self.selection.set_selection(equipment, self.view.visible())?;
        Ok(())
    }

    pub fn subscribe_selection(&mut self, observer: Box<SelectionObserver>) -> ObserverId {
        self.selection.subscribe(observer)
    }

    pub fn unsubscribe_selection(&mut self, id: ObserverId) -> bool {
        self.selection.unsubscribe(id)
    }

    fn sync_view(&mut self) {
        let source = self.store.equipment_manager().equipment();
        if let Some(change) = self.view.refresh(source) {
            self.dispatch(&change);
        }
    }

    fn dispatch(&mut self, change: &ListChange) {
        let selection_changed = self.selection.reconcile(change, self.view.visible());
        self.view.publish(change);
        if selection_changed {
            self.selection.publish();
        }
    }
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new(EquipmentManager::new(), UserPrefs::default())
    }
}

impl PartialEq for ModelManager {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
            && self.user_prefs == other.user_prefs
            && self.view.visible() == other.view.visible()
            && self.selection.selected() == other.selection.selected()
    }
}
