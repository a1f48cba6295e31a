//! Concrete store implementations backed by PostgreSQL and MongoDB.

pub mod employee_repo;
pub mod project_repo;

pub use employee_repo::EmployeeRepo;
pub use project_repo::ProjectRepo;
