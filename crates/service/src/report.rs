//! Employee report combining both stores.

use std::collections::BTreeMap;

use serde::Serialize;
use staffhub_core::error::CoreError;
use staffhub_core::stats::{count_by, SalarySummary};
use staffhub_core::types::DbId;

use crate::{EmployeeService, ProjectService};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReport {
    pub total_employees: usize,
    pub salary: SalarySummary,
    /// Head-count per job title.
    pub employees_by_title: BTreeMap<String, usize>,
    pub projects_per_employee: Vec<EmployeeProjectCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProjectCount {
    pub employee_id: DbId,
    pub name: String,
    pub projects: usize,
}

pub async fn employee_report(
    employees: &EmployeeService,
    projects: &ProjectService,
) -> Result<EmployeeReport, CoreError> {
    let all_employees = employees.get_all().await?;
    let all_projects = projects.get_all().await?;

    let projects_per_employee = all_employees
        .iter()
        .map(|e| EmployeeProjectCount {
            employee_id: e.id,
            name: e.name.clone(),
            projects: all_projects
                .iter()
                .filter(|p| p.employee_id == Some(e.id))
                .count(),
        })
        .collect();

    Ok(EmployeeReport {
        total_employees: all_employees.len(),
        salary: SalarySummary::from_salaries(all_employees.iter().map(|e| e.salary)),
        employees_by_title: count_by(all_employees.iter().map(|e| e.title.as_str())),
        projects_per_employee,
    })
}
