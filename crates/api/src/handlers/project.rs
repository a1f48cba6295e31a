//! Handlers for the `/projects` web resource.
//!
//! Projects are public. Task states submitted here are coerced leniently:
//! unrecognised text becomes `PENDING`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use staffhub_core::stats::ProjectStatistics;
use staffhub_core::task_state::StatePolicy;
use staffhub_db::models::project::{Project, ProjectInput, TaskInput};

use super::web::{path_segment, redirect_with, respond, with_input, Landing};
use crate::error::{AppError, AppResult};
use crate::extract::{BodyKind, PathParam, QueryParams, WebInput};
use crate::query::ProjectListParams;
use crate::state::AppState;

const LISTING: &str = "/projects";
const POLICY: StatePolicy = StatePolicy::Lenient;

/// GET /projects?employeeId=&completed=&search=
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ProjectListParams>,
) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(state.projects.find(&params.into()).await?))
}

/// GET /projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> AppResult<Json<Project>> {
    Ok(Json(state.projects.require(&id).await?))
}

/// POST /projects
pub async fn create(State(state): State<AppState>, input: WebInput<ProjectInput>) -> Response {
    let result = with_input(input.value, |i| state.projects.create(i, POLICY)).await;
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

/// PUT /projects/{id} and POST /projects/{id}
///
/// A form post keeps the existing tasks; a JSON body replaces them.
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    input: WebInput<ProjectInput>,
) -> Response {
    let result = match input.kind {
        BodyKind::Form => {
            with_input(input.value, |i| state.projects.update_details(&id, i, POLICY)).await
        }
        BodyKind::Json => with_input(input.value, |i| state.projects.update(&id, i, POLICY)).await,
    };
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

/// DELETE /projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> AppResult<StatusCode> {
    state.projects.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /projects/{id}/delete
pub async fn delete_form(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Response {
    match state.projects.delete(&id).await {
        Ok(()) => redirect_with(LISTING, "success", "deleted"),
        Err(err) => {
            let (_, _, message) = AppError::from(err).classify();
            redirect_with(LISTING, "error", &message)
        }
    }
}

/// POST /projects/{id}/tasks
pub async fn add_task(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    input: WebInput<TaskInput>,
) -> Response {
    let result = with_input(input.value, |i| state.projects.add_task(&id, i, POLICY)).await;
    let location = format!("{LISTING}/{}", path_segment(&id));
    respond(
        input.kind,
        Landing {
            location: &location,
            success: "task-added",
        },
        StatusCode::CREATED,
        result,
    )
}

/// PUT /projects/{id}/tasks/{index} and POST /projects/{id}/tasks/{index}
pub async fn update_task(
    State(state): State<AppState>,
    PathParam((id, index)): PathParam<(String, i64)>,
    input: WebInput<TaskInput>,
) -> Response {
    let result = with_input(input.value, |i| {
        state.projects.update_task(&id, index, i, POLICY)
    })
    .await;
    let location = format!("{LISTING}/{}", path_segment(&id));
    respond(
        input.kind,
        Landing {
            location: &location,
            success: "task-updated",
        },
        StatusCode::OK,
        result,
    )
}

/// DELETE /projects/{id}/tasks/{index}
pub async fn remove_task(
    State(state): State<AppState>,
    PathParam((id, index)): PathParam<(String, i64)>,
) -> AppResult<StatusCode> {
    state.projects.remove_task(&id, index).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /projects/statistics
pub async fn statistics(State(state): State<AppState>) -> AppResult<Json<ProjectStatistics>> {
    Ok(Json(state.projects.statistics().await?))
}
