//! Employee business rules atop an [`EmployeeStore`].

use std::sync::Arc;

use staffhub_core::error::CoreError;
use staffhub_core::types::DbId;
use staffhub_core::validation::validate_salary_range;
use staffhub_db::models::employee::{Employee, EmployeeInput};
use staffhub_db::store::EmployeeStore;

const ENTITY: &str = "Employee";

#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Create an employee. The store assigns the id.
    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, CoreError> {
        let new = input.validate()?;
        self.ensure_email_free(&new.email).await?;

        let employee = self.store.insert(&new).await?;
        tracing::info!(employee_id = employee.id, email = %employee.email, "Employee created");
        Ok(employee)
    }

    pub async fn get_all(&self) -> Result<Vec<Employee>, CoreError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> Result<Option<Employee>, CoreError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Like [`get_by_id`](Self::get_by_id) but absence is a `NotFound` error.
    pub async fn require(&self, id: DbId) -> Result<Employee, CoreError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    /// Name or title substring search. A blank term lists everyone.
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<Employee>, CoreError> {
        match term.map(str::trim).filter(|t| !t.is_empty()) {
            Some(term) => Ok(self.store.search_name_or_title(term).await?),
            None => self.get_all().await,
        }
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Employee>, CoreError> {
        Ok(self.store.search_by_name(term.trim()).await?)
    }

    pub async fn search_by_title(&self, term: &str) -> Result<Vec<Employee>, CoreError> {
        Ok(self.store.search_by_title(term.trim()).await?)
    }

    /// Inclusive salary range, highest first.
    pub async fn search_by_salary_range(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<Employee>, CoreError> {
        validate_salary_range(min, max)?;
        Ok(self.store.find_by_salary_range(min, max).await?)
    }

    /// Replace every field of an existing employee. The id never changes.
    pub async fn update(&self, id: DbId, input: EmployeeInput) -> Result<Employee, CoreError> {
        let current = self.require(id).await?;
        let new = input.validate()?;
        if new.email != current.email {
            self.ensure_email_free(&new.email).await?;
        }

        let employee = self
            .store
            .update(id, &new)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))?;
        tracing::info!(employee_id = id, "Employee updated");
        Ok(employee)
    }

    /// Delete by id. Deleting an absent employee is not an error.
    ///
    /// Projects referencing the employee keep the stale id.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        if self.store.delete(id).await? {
            tracing::info!(employee_id = id, "Employee deleted");
        }
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), CoreError> {
        Ok(self.store.ping().await?)
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), CoreError> {
        if self.store.find_by_email(email).await?.is_some() {
            tracing::warn!(email, "Rejected duplicate employee email");
            return Err(CoreError::Conflict(format!(
                "An employee with email '{email}' already exists"
            )));
        }
        Ok(())
    }
}
