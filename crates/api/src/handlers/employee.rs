//! Handlers for the `/employees` web resource. Every handler requires the
//! `admin` role.
//!
//! Reads return bare JSON. Mutations accept a form post (answered with a
//! redirect to the listing) or a JSON body (answered with JSON).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use staffhub_core::types::DbId;
use staffhub_db::models::employee::{Employee, EmployeeInput};
use staffhub_db::models::project::Project;
use staffhub_service::report::{employee_report, EmployeeReport};

use super::web::{redirect_with, respond, with_input, Landing};
use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, QueryParams, WebInput};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{NameParams, SalaryRangeParams, SearchParams, TermParams, TitleParams};
use crate::state::AppState;

const LISTING: &str = "/employees";

/// GET /employees?search=
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> AppResult<Json<Vec<Employee>>> {
    Ok(Json(state.employees.search(params.search.as_deref()).await?))
}

/// GET /employees/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<Employee>> {
    Ok(Json(state.employees.require(id).await?))
}

/// POST /employees
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    input: WebInput<EmployeeInput>,
) -> Response {
    let result = with_input(input.value, |i| state.employees.create(i)).await;
    respond(
        input.kind,
        Landing {
            location: LISTING,
            success: "created",
        },
        StatusCode::CREATED,
        result,
    )
}

/// PUT /employees/{id} and POST /employees/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    input: WebInput<EmployeeInput>,
) -> Response {
    let result = with_input(input.value, |i| state.employees.update(id, i)).await;
    respond(
        input.kind,
        Landing {
            location: LISTING,
            success: "updated",
        },
        StatusCode::OK,
        result,
    )
}

/// DELETE /employees/{id}
///
/// Idempotent: deleting an absent employee still answers 204.
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /employees/{id}/delete
pub async fn delete_form(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> Response {
    match state.employees.delete(id).await {
        Ok(()) => redirect_with(LISTING, "success", "deleted"),
        Err(err) => {
            let (_, _, message) = AppError::from(err).classify();
            redirect_with(LISTING, "error", &message)
        }
    }
}

/// GET /employees/search?term=
pub async fn search(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TermParams>,
) -> AppResult<Json<Vec<Employee>>> {
    Ok(Json(state.employees.search(params.term.as_deref()).await?))
}

/// GET /employees/search-name?name=
pub async fn search_by_name(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<NameParams>,
) -> AppResult<Json<Vec<Employee>>> {
    let name = params.name.unwrap_or_default();
    Ok(Json(state.employees.search_by_name(&name).await?))
}

/// GET /employees/search-title?title=
pub async fn search_by_title(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TitleParams>,
) -> AppResult<Json<Vec<Employee>>> {
    let title = params.title.unwrap_or_default();
    Ok(Json(state.employees.search_by_title(&title).await?))
}

/// GET /employees/search-salary?min=&max=
pub async fn search_by_salary(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SalaryRangeParams>,
) -> AppResult<Json<Vec<Employee>>> {
    Ok(Json(
        state
            .employees
            .search_by_salary_range(params.min, params.max)
            .await?,
    ))
}

/// GET /employees/{id}/projects
///
/// Lists projects referencing the id even if the employee no longer exists.
pub async fn projects(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(state.projects.get_by_employee(id).await?))
}

/// GET /employees/reports
pub async fn report(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<EmployeeReport>> {
    Ok(Json(employee_report(&state.employees, &state.projects).await?))
}
