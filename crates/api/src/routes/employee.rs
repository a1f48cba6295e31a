//! Route definitions for the employee resource, on the web surface and
//! under `/api`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{employee, employee_api, export};
use crate::state::AppState;

/// Routes mounted at `/employees`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// POST   /{id}               -> update
/// DELETE /{id}               -> delete
/// POST   /{id}/delete        -> delete_form
/// GET    /{id}/projects      -> projects
/// GET    /search             -> search
/// GET    /search-name        -> search_by_name
/// GET    /search-title       -> search_by_title
/// GET    /search-salary      -> search_by_salary
/// GET    /reports            -> report
/// GET    /export/csv         -> employees_csv
/// GET    /export/excel       -> employees_excel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employee::list).post(employee::create))
        .route(
            "/{id}",
            get(employee::get_by_id)
                .put(employee::update)
                .post(employee::update)
                .delete(employee::delete),
        )
        .route("/{id}/delete", post(employee::delete_form))
        .route("/{id}/projects", get(employee::projects))
        .route("/search", get(employee::search))
        .route("/search-name", get(employee::search_by_name))
        .route("/search-title", get(employee::search_by_title))
        .route("/search-salary", get(employee::search_by_salary))
        .route("/reports", get(employee::report))
        .route("/export/csv", get(export::employees_csv))
        .route("/export/excel", get(export::employees_excel))
}

/// Routes mounted at `/api/employees`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// GET    /{id}/projects      -> projects
/// GET    /search             -> search
/// GET    /search-name        -> search_by_name
/// GET    /search-title       -> search_by_title
/// GET    /search-salary      -> search_by_salary
/// ```
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(employee_api::list).post(employee_api::create))
        .route(
            "/{id}",
            get(employee_api::get_by_id)
                .put(employee_api::update)
                .delete(employee_api::delete),
        )
        .route("/{id}/projects", get(employee_api::projects))
        .route("/search", get(employee_api::search))
        .route("/search-name", get(employee_api::search_by_name))
        .route("/search-title", get(employee_api::search_by_title))
        .route("/search-salary", get(employee_api::search_by_salary))
}
