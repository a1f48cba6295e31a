//! In-process stores with the same semantics as the database repositories.
//!
//! Used by the service and HTTP test suites, and handy for local demos.

use std::collections::BTreeMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use staffhub_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::employee::{Employee, NewEmployee};
use crate::models::project::{NewProject, Project};
use crate::store::{EmployeeDirectory, EmployeeStore, ProjectStore};

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/* --------------------------------------------------------------------------
Employees
-------------------------------------------------------------------------- */

#[derive(Default)]
struct EmployeeTable {
    rows: BTreeMap<DbId, Employee>,
    last_id: DbId,
}

impl EmployeeTable {
    fn email_taken(&self, email: &str, except: Option<DbId>) -> bool {
        self.rows
            .values()
            .any(|e| e.email == email && Some(e.id) != except)
    }

    fn filter(&self, pred: impl Fn(&Employee) -> bool) -> Vec<Employee> {
        self.rows.values().filter(|e| pred(e)).cloned().collect()
    }
}

fn duplicate_email(email: &str) -> StoreError {
    StoreError::Duplicate(format!("An employee with email '{email}' already exists"))
}

#[derive(Default)]
pub struct MemoryEmployeeStore {
    table: RwLock<EmployeeTable>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeDirectory for MemoryEmployeeStore {
    async fn exists(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_all(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.table.read().await.filter(|_| true))
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Employee>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn search_name_or_title(&self, term: &str) -> StoreResult<Vec<Employee>> {
        Ok(self.table.read().await.filter(|e| {
            contains_ignore_case(&e.name, term) || contains_ignore_case(&e.title, term)
        }))
    }

    async fn search_by_name(&self, term: &str) -> StoreResult<Vec<Employee>> {
        Ok(self
            .table
            .read()
            .await
            .filter(|e| contains_ignore_case(&e.name, term)))
    }

    async fn search_by_title(&self, term: &str) -> StoreResult<Vec<Employee>> {
        Ok(self
            .table
            .read()
            .await
            .filter(|e| contains_ignore_case(&e.title, term)))
    }

    async fn find_by_salary_range(&self, min: f64, max: f64) -> StoreResult<Vec<Employee>> {
        let mut rows = self
            .table
            .read()
            .await
            .filter(|e| e.salary >= min && e.salary <= max);
        rows.sort_by(|a, b| b.salary.total_cmp(&a.salary).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn insert(&self, employee: &NewEmployee) -> StoreResult<Employee> {
        let mut table = self.table.write().await;
        if table.email_taken(&employee.email, None) {
            return Err(duplicate_email(&employee.email));
        }
        table.last_id += 1;
        let row = Employee {
            id: table.last_id,
            name: employee.name.clone(),
            title: employee.title.clone(),
            salary: employee.salary,
            email: employee.email.clone(),
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: DbId, employee: &NewEmployee) -> StoreResult<Option<Employee>> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if table.email_taken(&employee.email, Some(id)) {
            return Err(duplicate_email(&employee.email));
        }
        let row = Employee {
            id,
            name: employee.name.clone(),
            title: employee.title.clone(),
            salary: employee.salary,
            email: employee.email.clone(),
        };
        table.rows.insert(id, row.clone());
        Ok(Some(row))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/* --------------------------------------------------------------------------
Projects
-------------------------------------------------------------------------- */

/// Documents kept in insertion order, like a natural-order collection scan.
#[derive(Default)]
pub struct MemoryProjectStore {
    documents: RwLock<Vec<Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filter(&self, pred: impl Fn(&Project) -> bool) -> Vec<Project> {
        self.documents
            .read()
            .await
            .iter()
            .filter(|p| pred(p))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn find_all(&self) -> StoreResult<Vec<Project>> {
        Ok(self.documents.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Project>> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_employee(&self, employee_id: DbId) -> StoreResult<Vec<Project>> {
        Ok(self
            .filter(|p| p.employee_id == Some(employee_id))
            .await)
    }

    async fn search_by_name(&self, term: &str) -> StoreResult<Vec<Project>> {
        Ok(self.filter(|p| contains_ignore_case(&p.name, term)).await)
    }

    async fn find_by_completed(&self, completed: bool) -> StoreResult<Vec<Project>> {
        Ok(self.filter(|p| p.completed == completed).await)
    }

    async fn find_by_employee_and_completed(
        &self,
        employee_id: DbId,
        completed: bool,
    ) -> StoreResult<Vec<Project>> {
        Ok(self
            .filter(|p| p.employee_id == Some(employee_id) && p.completed == completed)
            .await)
    }

    async fn insert(&self, project: &NewProject) -> StoreResult<Project> {
        let stored = Project {
            id: ObjectId::new().to_hex(),
            name: project.name.clone(),
            description: project.description.clone(),
            employee_id: project.employee_id,
            start_date: project.start_date,
            completed: project.completed,
            tasks: project.tasks.clone(),
            version: 0,
        };
        self.documents.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn replace(&self, project: &Project) -> StoreResult<Project> {
        let mut documents = self.documents.write().await;
        let slot = documents
            .iter_mut()
            .find(|p| p.id == project.id && p.version == project.version)
            .ok_or_else(|| StoreError::VersionConflict {
                id: project.id.clone(),
            })?;
        *slot = Project {
            version: project.version + 1,
            ..project.clone()
        };
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|p| p.id != id);
        Ok(documents.len() != before)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
