//! Predicate-filtered live view over the equipment collection.
//!
//! # Responsibility
//! - Hold the active predicate and the last published visible subset.
//! - Turn collection or predicate changes into `ListChange` events.
//!
//! # Invariants
//! - `visible` always equals the source filtered by `predicate` as of the
//!   last `refresh`/`set_predicate` call.
//! - `iter` reads the live source; it never returns the cached subset.

use crate::model::equipment::Equipment;
use crate::model::fields::Tag;
use crate::store::change::{ListChange, ObserverId, Observers};

/// Predicate deciding whether a record is visible.
pub type EquipmentPredicate = Box<dyn Fn(&Equipment) -> bool>;

/// Callback receiving a view change and the view contents after it.
pub type ViewObserver = dyn FnMut(&ListChange, &[Equipment]);

/// Predicate that accepts every record.
pub fn show_all() -> EquipmentPredicate {
    Box::new(|_: &Equipment| true)
}

/// Accepts records whose name contains any of `keywords` as a whole word,
/// ignoring ASCII case.
pub fn name_contains_keywords(keywords: Vec<String>) -> EquipmentPredicate {
    let keywords: Vec<String> = keywords
        .into_iter()
        .map(|keyword| keyword.trim().to_ascii_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    Box::new(move |equipment: &Equipment| {
        equipment
            .name
            .as_str()
            .split_whitespace()
            .any(|word| keywords.iter().any(|keyword| word.eq_ignore_ascii_case(keyword)))
    })
}

/// Accepts records carrying `tag`.
pub fn has_tag(tag: Tag) -> EquipmentPredicate {
    Box::new(move |equipment: &Equipment| equipment.has_tag(&tag))
}

/// Lazy, restartable iterator over the visible part of a source slice.
#[derive(Clone)]
pub struct FilteredIter<'a> {
    inner: std::slice::Iter<'a, Equipment>,
    predicate: &'a dyn Fn(&Equipment) -> bool,
}

impl<'a> Iterator for FilteredIter<'a> {
    type Item = &'a Equipment;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = self.predicate;
        self.inner.find(|equipment| predicate(equipment))
    }
}

/// Filtered projection with change notification.
pub struct FilteredView {
    predicate: EquipmentPredicate,
    visible: Vec<Equipment>,
    observers: Observers<ViewObserver>,
}

impl FilteredView {
    /// Creates a view showing all of `source`.
    pub fn new(source: &[Equipment]) -> Self {
        Self {
            predicate: show_all(),
            visible: source.to_vec(),
            observers: Observers::new(),
        }
    }

    /// Iterates the records of `source` accepted by the active predicate.
    pub fn iter<'a>(&'a self, source: &'a [Equipment]) -> FilteredIter<'a> {
        FilteredIter {
            inner: source.iter(),
            predicate: self.predicate.as_ref(),
        }
    }

    /// Visible subset as of the last recomputation.
    pub fn visible(&self) -> &[Equipment] {
        &self.visible
    }

    /// Exact-match membership in the visible subset.
    pub fn contains(&self, equipment: &Equipment) -> bool {
        self.visible.iter().any(|visible| visible == equipment)
    }

    /// Replaces the predicate and recomputes against `source`.
    pub fn set_predicate(
        &mut self,
        predicate: EquipmentPredicate,
        source: &[Equipment],
    ) -> Option<ListChange> {
        self.predicate = predicate;
        self.refresh(source)
    }

    /// Recomputes the visible subset and returns what changed, if anything.
    ///
    /// Does not notify observers; call `publish` once dependent state is
    /// consistent.
    pub fn refresh(&mut self, source: &[Equipment]) -> Option<ListChange> {
        let next: Vec<Equipment> = self.iter(source).cloned().collect();
        let change = ListChange::between(&self.visible, &next);
        self.visible = next;
        change
    }

    pub fn subscribe(&mut self, observer: Box<ViewObserver>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Delivers `change` to every observer together with the current view.
    pub fn publish(&mut self, change: &ListChange) {
        let visible = &self.visible;
        self.observers
            .for_each(|observer| observer(change, visible.as_slice()));
    }
}

impl std::fmt::Debug for FilteredView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredView")
            .field("visible", &self.visible)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
