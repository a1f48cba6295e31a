//! Domain logic shared by the store, service, and HTTP layers.
//!
//! Nothing in this crate performs I/O: it holds the error taxonomy, the
//! task-state coercion rules, input validation helpers, report aggregation,
//! and the tabular export model.

pub mod error;
pub mod export;
pub mod roles;
pub mod stats;
pub mod task_state;
pub mod types;
pub mod validation;
