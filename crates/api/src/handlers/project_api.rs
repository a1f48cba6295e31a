//! Handlers for `/api/projects`. Task states are parsed strictly here:
//! unrecognised text is a 400 rather than a silent `PENDING`.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use staffhub_core::stats::ProjectStatistics;
use staffhub_core::task_state::StatePolicy;
use staffhub_db::models::project::{Project, ProjectInput, TaskInput};
use staffhub_service::ProjectFilter;

use crate::error::AppResult;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::query::ProjectListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

const POLICY: StatePolicy = StatePolicy::Strict;

type ProjectResponse = AppResult<Json<ApiResponse<Project>>>;

/// GET /api/projects?employeeId=&completed=&search=
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ProjectListParams>,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let filter = ProjectFilter::from(params);
    let projects = state.projects.find(&filter).await?;
    let filters = serde_json::to_value(&filter).unwrap_or(Value::Null);
    Ok(Json(
        ApiResponse::list("Projects retrieved", projects).with_filters(filters),
    ))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> ProjectResponse {
    let project = state.projects.require(&id).await?;
    Ok(Json(ApiResponse::ok("Project found", project)))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ProjectInput>,
) -> ProjectResponse {
    let project = state.projects.create(input, POLICY).await?;
    Ok(Json(ApiResponse::ok("Project created", project)))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonBody(input): JsonBody<ProjectInput>,
) -> ProjectResponse {
    let project = state.projects.update(&id, input, POLICY).await?;
    Ok(Json(ApiResponse::ok("Project updated", project)))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let project = state.projects.require(&id).await?;
    state.projects.delete(&id).await?;
    Ok(Json(ApiResponse::ok(
        "Project deleted",
        json!({ "id": project.id, "name": project.name }),
    )))
}

/// POST /api/projects/{id}/tasks
pub async fn add_task(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonBody(input): JsonBody<TaskInput>,
) -> ProjectResponse {
    let project = state.projects.add_task(&id, input, POLICY).await?;
    let index = project.tasks.len().saturating_sub(1);
    Ok(Json(
        ApiResponse::ok("Task added", project).with_task_index(index),
    ))
}

/// PUT /api/projects/{id}/tasks/{index}
pub async fn update_task(
    State(state): State<AppState>,
    PathParam((id, index)): PathParam<(String, i64)>,
    JsonBody(input): JsonBody<TaskInput>,
) -> ProjectResponse {
    let project = state
        .projects
        .update_task(&id, index, input, POLICY)
        .await?;
    // The service has already bounds-checked `index`.
    Ok(Json(
        ApiResponse::ok("Task updated", project).with_task_index(index as usize),
    ))
}

/// DELETE /api/projects/{id}/tasks/{index}
pub async fn remove_task(
    State(state): State<AppState>,
    PathParam((id, index)): PathParam<(String, i64)>,
) -> ProjectResponse {
    let (project, removed) = state.projects.remove_task(&id, index).await?;
    tracing::debug!(project_id = %project.id, title = %removed.title, "Removed task via API");
    Ok(Json(
        ApiResponse::ok(format!("Task '{}' removed", removed.title), project)
            .with_task_index(index as usize),
    ))
}

/// GET /api/projects/statistics
pub async fn statistics(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProjectStatistics>>> {
    let stats = state.projects.statistics().await?;
    Ok(Json(ApiResponse::ok("Statistics computed", stats)))
}
