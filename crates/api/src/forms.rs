//! HTML form bindings.
//!
//! Browsers submit every field as text and send blank strings for empty
//! inputs, so forms bind to all-`String` structs that are then converted to
//! the typed inputs the services take.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;
use staffhub_db::models::employee::EmployeeInput;
use staffhub_db::models::project::{ProjectInput, TaskInput};

use crate::error::{AppError, AppResult};
use crate::extract::FormBinding;
use crate::handlers::auth::LoginRequest;

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_field<T: FromStr>(label: &str, value: Option<String>) -> AppResult<Option<T>> {
    blank_to_none(value)
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| AppError::BadRequest(format!("{label} has an invalid value '{v}'")))
        })
        .transpose()
}

fn parse_date(label: &str, value: Option<String>) -> AppResult<Option<NaiveDate>> {
    blank_to_none(value)
        .map(|v| {
            NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").map_err(|_| {
                AppError::BadRequest(format!("{label} must be a date in YYYY-MM-DD format"))
            })
        })
        .transpose()
}

/// Checkbox semantics: present and not `false`/`off`/`0` means checked.
fn parse_checkbox(value: Option<String>) -> bool {
    blank_to_none(value).is_some_and(|v| {
        !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "off" | "0")
    })
}

#[derive(Debug, Deserialize)]
pub struct EmployeeForm {
    pub name: Option<String>,
    pub title: Option<String>,
    pub salary: Option<String>,
    pub email: Option<String>,
}

impl FormBinding for EmployeeInput {
    type Form = EmployeeForm;

    fn from_form(form: EmployeeForm) -> AppResult<Self> {
        Ok(EmployeeInput {
            name: form.name,
            title: form.title,
            salary: parse_field("Salary", form.salary)?,
            email: form.email,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub employee_id: Option<String>,
    pub start_date: Option<String>,
    pub completed: Option<String>,
}

impl FormBinding for ProjectInput {
    type Form = ProjectForm;

    /// Project forms never carry tasks; tasks are edited one at a time.
    fn from_form(form: ProjectForm) -> AppResult<Self> {
        Ok(ProjectInput {
            name: form.name,
            description: form.description,
            employee_id: parse_field("Employee", form.employee_id)?,
            start_date: parse_date("Start date", form.start_date)?,
            completed: Some(parse_checkbox(form.completed)),
            tasks: None,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    pub title: Option<String>,
    pub state: Option<String>,
    pub description: Option<String>,
    pub assigned_employee_id: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub completion_date: Option<String>,
    pub comments: Option<String>,
}

impl FormBinding for TaskInput {
    type Form = TaskForm;

    fn from_form(form: TaskForm) -> AppResult<Self> {
        Ok(TaskInput {
            title: form.title,
            state: blank_to_none(form.state),
            description: form.description,
            assigned_employee_id: parse_field("Assigned employee", form.assigned_employee_id)?,
            start_date: parse_date("Start date", form.start_date)?,
            due_date: parse_date("Due date", form.due_date)?,
            completion_date: parse_date("Completion date", form.completion_date)?,
            comments: form.comments,
        })
    }
}

impl FormBinding for LoginRequest {
    type Form = LoginRequest;

    fn from_form(form: LoginRequest) -> AppResult<Self> {
        Ok(form)
    }
}
