//! Route definitions for the project resource, on the web surface and
//! under `/api`. Task routes address tasks by position.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{export, project, project_api};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// POST   /{id}                  -> update
/// DELETE /{id}                  -> delete
/// POST   /{id}/delete           -> delete_form
/// POST   /{id}/tasks            -> add_task
/// PUT    /{id}/tasks/{index}    -> update_task
/// POST   /{id}/tasks/{index}    -> update_task
/// DELETE /{id}/tasks/{index}    -> remove_task
/// GET    /statistics            -> statistics
/// GET    /export/csv            -> projects_csv
/// GET    /export/excel          -> projects_excel
/// GET    /export/detailed       -> projects_detailed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .post(project::update)
                .delete(project::delete),
        )
        .route("/{id}/delete", post(project::delete_form))
        .route("/{id}/tasks", post(project::add_task))
        .route(
            "/{id}/tasks/{index}",
            put(project::update_task)
                .post(project::update_task)
                .delete(project::remove_task),
        )
        .route("/statistics", get(project::statistics))
        .route("/export/csv", get(export::projects_csv))
        .route("/export/excel", get(export::projects_excel))
        .route("/export/detailed", get(export::projects_detailed))
}

/// Routes mounted at `/api/projects`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// POST   /{id}/tasks            -> add_task
/// PUT    /{id}/tasks/{index}    -> update_task
/// DELETE /{id}/tasks/{index}    -> remove_task
/// GET    /statistics            -> statistics
/// ```
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(project_api::list).post(project_api::create))
        .route(
            "/{id}",
            get(project_api::get_by_id)
                .put(project_api::update)
                .delete(project_api::delete),
        )
        .route("/{id}/tasks", post(project_api::add_task))
        .route(
            "/{id}/tasks/{index}",
            put(project_api::update_task).delete(project_api::remove_task),
        )
        .route("/statistics", get(project_api::statistics))
}
