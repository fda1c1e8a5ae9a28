//! Structural change events and observer registration.
//!
//! # Responsibility
//! - Describe one contiguous structural change of an equipment list.
//! - Hold callback lists that receive changes synchronously.
//!
//! # Invariants
//! - `removed` lists elements of the old list starting at `from`.
//! - `added` lists elements of the new list starting at `from`.
//! - Elements outside `from..from + removed.len()` (old) and
//!   `from..from + added.len()` (new) are unchanged and keep their order.

use crate::model::equipment::Equipment;

/// One contiguous structural change between two list states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChange {
    /// Index of the first affected element, valid in both old and new list.
    pub from: usize,
    pub removed: Vec<Equipment>,
    pub added: Vec<Equipment>,
}

impl ListChange {
    pub fn was_added(&self) -> bool {
        !self.added.is_empty()
    }

    pub fn was_removed(&self) -> bool {
        !self.removed.is_empty()
    }

    /// Elements were both removed and added at the same position.
    pub fn was_replaced(&self) -> bool {
        self.was_added() && self.was_removed()
    }

    /// Replacement where the range keeps its length.
    pub fn is_same_size_replacement(&self) -> bool {
        self.was_replaced() && self.added.len() == self.removed.len()
    }

    /// Computes the change turning `old` into `new`.
    ///
    /// Trims the common prefix and suffix (full equality) and reports the
    /// remaining middle ranges. Returns `None` when the lists are equal.
    pub fn between(old: &[Equipment], new: &[Equipment]) -> Option<ListChange> {
        let prefix = old
            .iter()
            .zip(new.iter())
            .take_while(|(left, right)| left == right)
            .count();
        if prefix == old.len() && prefix == new.len() {
            return None;
        }

        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(left, right)| left == right)
            .count();

        Some(ListChange {
            from: prefix,
            removed: old[prefix..old.len() - suffix].to_vec(),
            added: new[prefix..new.len() - suffix].to_vec(),
        })
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

/// Ordered list of boxed callbacks of type `F`.
///
/// Callbacks run in subscription order.
pub struct Observers<F: ?Sized> {
    next_id: u32,
    entries: Vec<(ObserverId, Box<F>)>,
}

impl<F: ?Sized> Observers<F> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: Box<F>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes `call` once per callback, in subscription order.
    pub fn for_each(&mut self, mut call: impl FnMut(&mut F)) {
        for (_, callback) in &mut self.entries {
            call(callback.as_mut());
        }
    }
}

impl<F: ?Sized> Default for Observers<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> std::fmt::Debug for Observers<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}
