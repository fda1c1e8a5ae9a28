//! In-memory equipment store: history, filtered view, selection.
//!
//! # Responsibility
//! - Version the working collection with commit/undo/redo.
//! - Project the collection through a predicate and publish changes.
//! - Keep the selected record valid as the view changes.
//!
//! # Invariants
//! - All components are single-threaded and notify synchronously.

pub mod change;
pub mod filtered;
pub mod selection;
pub mod versioned;
