//! Store traits consumed by the service layer.
//!
//! Each operation is a named predicate over the backing store. Absence is
//! represented with `Option`/`bool`, never as an error.

use async_trait::async_trait;
use staffhub_core::types::DbId;

use crate::error::StoreResult;
use crate::models::employee::{Employee, NewEmployee};
use crate::models::project::{NewProject, Project};

/// Narrow existence check the project side uses to validate employee references.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn exists(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All employees ordered by id ascending.
    async fn find_all(&self) -> StoreResult<Vec<Employee>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Employee>>;

    /// Exact, case-sensitive email lookup.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Employee>>;

    /// Case-insensitive substring match on name or title.
    async fn search_name_or_title(&self, term: &str) -> StoreResult<Vec<Employee>>;

    async fn search_by_name(&self, term: &str) -> StoreResult<Vec<Employee>>;

    async fn search_by_title(&self, term: &str) -> StoreResult<Vec<Employee>>;

    /// Inclusive range, highest salary first.
    async fn find_by_salary_range(&self, min: f64, max: f64) -> StoreResult<Vec<Employee>>;

    /// Fails with [`StoreError::Duplicate`](crate::StoreError::Duplicate) on an email collision.
    async fn insert(&self, employee: &NewEmployee) -> StoreResult<Employee>;

    /// Replace every field of row `id`. `None` if the row does not exist.
    async fn update(&self, id: DbId, employee: &NewEmployee) -> StoreResult<Option<Employee>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Project>>;

    /// Ids that are not valid document ids resolve to `None`.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Project>>;

    async fn find_by_employee(&self, employee_id: DbId) -> StoreResult<Vec<Project>>;

    /// Case-insensitive substring match on name.
    async fn search_by_name(&self, term: &str) -> StoreResult<Vec<Project>>;

    async fn find_by_completed(&self, completed: bool) -> StoreResult<Vec<Project>>;

    async fn find_by_employee_and_completed(
        &self,
        employee_id: DbId,
        completed: bool,
    ) -> StoreResult<Vec<Project>>;

    /// Persist a new document at version 0.
    async fn insert(&self, project: &NewProject) -> StoreResult<Project>;

    /// Whole-document replace, accepted only while the stored version still
    /// equals `project.version`. Returns the document at its new version.
    async fn replace(&self, project: &Project) -> StoreResult<Project>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;
}
