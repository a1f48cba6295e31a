//! Handlers for `/api/employees`. Every response uses the [`ApiResponse`]
//! envelope and every handler requires the `admin` role.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use staffhub_core::types::DbId;
use staffhub_db::models::employee::{Employee, EmployeeInput};
use staffhub_db::models::project::Project;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{
    required_term, NameParams, SalaryRangeParams, SearchParams, TermParams, TitleParams,
};
use crate::response::ApiResponse;
use crate::state::AppState;

type ListResponse<T> = AppResult<Json<ApiResponse<Vec<T>>>>;

fn missing(param: &str) -> AppError {
    AppError::BadRequest(format!("Query parameter '{param}' is required"))
}

/// GET /api/employees?search=
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> ListResponse<Employee> {
    let search = required_term(params.search);
    let employees = state.employees.search(search.as_deref()).await?;
    Ok(Json(
        ApiResponse::list("Employees retrieved", employees)
            .with_filters(json!({ "search": search })),
    ))
}

/// GET /api/employees/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let employee = state.employees.require(id).await?;
    Ok(Json(ApiResponse::ok("Employee found", employee)))
}

/// POST /api/employees
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<EmployeeInput>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let employee = state.employees.create(input).await?;
    Ok(Json(ApiResponse::ok("Employee created", employee)))
}

/// PUT /api/employees/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<EmployeeInput>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let employee = state.employees.update(id, input).await?;
    Ok(Json(ApiResponse::ok("Employee updated", employee)))
}

/// DELETE /api/employees/{id}
///
/// Unlike the web surface, deleting an absent employee is a 404.
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let employee = state.employees.require(id).await?;
    state.employees.delete(id).await?;
    Ok(Json(ApiResponse::ok(
        "Employee deleted",
        json!({ "id": employee.id, "name": employee.name }),
    )))
}

/// GET /api/employees/search?term=
pub async fn search(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TermParams>,
) -> ListResponse<Employee> {
    let term = required_term(params.term).ok_or_else(|| missing("term"))?;
    let employees = state.employees.search(Some(&term)).await?;
    Ok(Json(
        ApiResponse::list("Employees retrieved", employees).with_filters(json!({ "term": term })),
    ))
}

/// GET /api/employees/search-name?name=
pub async fn search_by_name(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<NameParams>,
) -> ListResponse<Employee> {
    let name = required_term(params.name).ok_or_else(|| missing("name"))?;
    let employees = state.employees.search_by_name(&name).await?;
    Ok(Json(
        ApiResponse::list("Employees retrieved", employees).with_filters(json!({ "name": name })),
    ))
}

/// GET /api/employees/search-title?title=
pub async fn search_by_title(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TitleParams>,
) -> ListResponse<Employee> {
    let title = required_term(params.title).ok_or_else(|| missing("title"))?;
    let employees = state.employees.search_by_title(&title).await?;
    Ok(Json(
        ApiResponse::list("Employees retrieved", employees)
            .with_filters(json!({ "title": title })),
    ))
}

/// GET /api/employees/search-salary?min=&max=
pub async fn search_by_salary(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SalaryRangeParams>,
) -> ListResponse<Employee> {
    let employees = state
        .employees
        .search_by_salary_range(params.min, params.max)
        .await?;
    Ok(Json(
        ApiResponse::list("Employees retrieved", employees)
            .with_filters(json!({ "min": params.min, "max": params.max })),
    ))
}

/// GET /api/employees/{id}/projects
pub async fn projects(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> ListResponse<Project> {
    let projects = state.projects.get_by_employee(id).await?;
    Ok(Json(
        ApiResponse::list("Projects retrieved", projects)
            .with_filters(json!({ "employeeId": id })),
    ))
}
