pub mod auth;
pub mod employee;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the web route tree (`/employees`, `/projects`, `/login`).
///
/// ```text
/// /login                                   login (public)
///
/// /employees                               list, create (admin only)
/// /employees/{id}                          get, update, delete
/// /employees/{id}/delete                   delete from an HTML form
/// /employees/{id}/projects                 projects of one employee
/// /employees/search                        name-or-title search
/// /employees/search-name                   name search
/// /employees/search-title                  title search
/// /employees/search-salary                 inclusive salary range
/// /employees/reports                       aggregate report
/// /employees/export/{csv,excel}            downloads
///
/// /projects                                list (filters), create (public)
/// /projects/{id}                           get, update, delete
/// /projects/{id}/delete                    delete from an HTML form
/// /projects/{id}/tasks                     append task
/// /projects/{id}/tasks/{index}             replace, remove task
/// /projects/statistics                     aggregate counts
/// /projects/export/{csv,excel,detailed}    downloads
/// ```
pub fn web_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/employees", employee::router())
        .nest("/projects", project::router())
}

/// Build the `/api` route tree. Same resources, wrapped in the JSON envelope.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/employees", employee::api_router())
        .nest("/projects", project::api_router())
}
