//! Persisted models and their input DTOs.

pub mod employee;
pub mod project;
