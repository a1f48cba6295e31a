//! Business rules for employees and projects.
//!
//! Services own validation, uniqueness checks, cross-store reference checks
//! and task sub-resource mutation. They depend only on the store traits from
//! `staffhub_db::store`.

pub mod employee;
pub mod project;
pub mod report;

pub use employee::EmployeeService;
pub use project::{ProjectFilter, ProjectService};
