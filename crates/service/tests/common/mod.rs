#![allow(dead_code)]

use std::sync::Arc;

use staffhub_db::memory::{MemoryEmployeeStore, MemoryProjectStore};
use staffhub_db::models::employee::{Employee, EmployeeInput};
use staffhub_db::models::project::{ProjectInput, TaskInput};
use staffhub_service::{EmployeeService, ProjectService};

pub struct Services {
    pub employees: EmployeeService,
    pub projects: ProjectService,
}

/// Both services wired over fresh in-memory stores.
pub fn services() -> Services {
    let employee_store = Arc::new(MemoryEmployeeStore::new());
    let project_store = Arc::new(MemoryProjectStore::new());
    Services {
        employees: EmployeeService::new(employee_store.clone()),
        projects: ProjectService::new(project_store, employee_store),
    }
}

pub fn employee_input(name: &str, title: &str, salary: f64, email: &str) -> EmployeeInput {
    EmployeeInput {
        name: Some(name.into()),
        title: Some(title.into()),
        salary: Some(salary),
        email: Some(email.into()),
    }
}

pub async fn seed_employee(s: &Services, name: &str, email: &str) -> Employee {
    s.employees
        .create(employee_input(name, "Dev", 1000.0, email))
        .await
        .expect("seed employee")
}

pub fn project_input(name: &str, employee_id: Option<i64>) -> ProjectInput {
    ProjectInput {
        name: Some(name.into()),
        employee_id,
        ..Default::default()
    }
}

pub fn task_input(title: &str, state: Option<&str>) -> TaskInput {
    TaskInput {
        title: Some(title.into()),
        state: state.map(Into::into),
        ..Default::default()
    }
}
