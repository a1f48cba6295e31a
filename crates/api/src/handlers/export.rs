//! File exports for employees and projects.

use std::collections::HashMap;

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use staffhub_core::stats::TaskStats;
use staffhub_db::models::employee::Employee;
use staffhub_db::models::project::Project;
use staffhub_service::ProjectFilter;

use crate::error::AppResult;
use crate::export::{csv_download, employee_table, project_table, xlsx_download};
use crate::extract::QueryParams;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ExportParams;
use crate::state::AppState;

/// One entry of the detailed project export.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedProject {
    pub project: Project,
    /// Absent when the project has no employee or the reference dangles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
    pub task_stats: TaskStats,
}

async fn export_projects(state: &AppState, params: ExportParams) -> AppResult<Vec<Project>> {
    let filter = ProjectFilter {
        employee_id: params.employee_id,
        ..ProjectFilter::default()
    };
    Ok(state.projects.find(&filter).await?)
}

/// GET /employees/export/csv
pub async fn employees_csv(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Response> {
    let employees = state.employees.get_all().await?;
    tracing::info!(rows = employees.len(), "Exporting employees as CSV");
    csv_download(&employee_table(&employees), "employees.csv")
}

/// GET /employees/export/excel
pub async fn employees_excel(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Response> {
    let employees = state.employees.get_all().await?;
    tracing::info!(rows = employees.len(), "Exporting employees as XLSX");
    xlsx_download(&employee_table(&employees), "employees.xlsx")
}

/// GET /projects/export/csv?employeeId=
pub async fn projects_csv(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ExportParams>,
) -> AppResult<Response> {
    let projects = export_projects(&state, params).await?;
    tracing::info!(rows = projects.len(), "Exporting projects as CSV");
    csv_download(&project_table(&projects), "projects.csv")
}

/// GET /projects/export/excel?employeeId=
pub async fn projects_excel(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ExportParams>,
) -> AppResult<Response> {
    let projects = export_projects(&state, params).await?;
    tracing::info!(rows = projects.len(), "Exporting projects as XLSX");
    xlsx_download(&project_table(&projects), "projects.xlsx")
}

/// GET /projects/export/detailed
///
/// Every project with its task breakdown and, when it resolves, the
/// assigned employee.
pub async fn projects_detailed(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DetailedProject>>> {
    let projects = state.projects.get_all().await?;
    let employees: HashMap<_, _> = state
        .employees
        .get_all()
        .await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    let detailed = projects
        .into_iter()
        .map(|project| DetailedProject {
            employee: project
                .employee_id
                .and_then(|id| employees.get(&id).cloned()),
            task_stats: project.task_stats(),
            project,
        })
        .collect();

    Ok(Json(detailed))
}
