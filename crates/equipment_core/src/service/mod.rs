//! Core use-case services.
//!
//! # Responsibility
//! - Expose the model facade used by command and presentation layers.
//! - Keep callers decoupled from store, view and selection internals.

pub mod model_manager;
