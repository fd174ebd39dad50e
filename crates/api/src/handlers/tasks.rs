//! Handlers for the `/tasks` resource.
//!
//! Ownership scoping mirrors the categories handlers: foreign rows read as
//! 404. A task's `category_id` must reference a category owned by the same
//! user (400 otherwise).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskforge_core::error::CoreError;
use taskforge_core::types::DbId;
use taskforge_db::models::task::{CreateTask, UpdateTask};
use taskforge_db::repositories::task_repo::TaskListParams;
use taskforge_db::repositories::{CategoryRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tasks
///
/// List the caller's tasks, optionally filtered by `status` / `category_id`.
pub async fn list_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<impl IntoResponse> {
    let tasks = TaskRepo::list_for_user(&state.pool, auth.user.id, &params).await?;

    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/tasks/stats
///
/// Per-status counts across all of the caller's tasks.
pub async fn task_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = TaskRepo::stats_for_user(&state.pool, auth.user.id).await?;

    Ok(Json(DataResponse { data: stats }))
}

/// POST /api/v1/tasks
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task title must not be empty".into(),
        )));
    }

    if let Some(category_id) = input.category_id {
        ensure_category_owned(&state, auth.user.id, category_id).await?;
    }

    let task = TaskRepo::create(&state.pool, auth.user.id, &input).await?;

    tracing::info!(task_id = task.id, user_id = auth.user.id, "Task created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// GET /api/v1/tasks/{id}
pub async fn get_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = TaskRepo::find_one(&state.pool, auth.user.id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    Ok(Json(DataResponse { data: task }))
}

/// PUT /api/v1/tasks/{id}
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<impl IntoResponse> {
    if let Some(category_id) = input.category_id {
        ensure_category_owned(&state, auth.user.id, category_id).await?;
    }

    let task = TaskRepo::update(&state.pool, auth.user.id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    tracing::info!(task_id = id, user_id = auth.user.id, "Task updated");

    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TaskRepo::remove(&state.pool, auth.user.id, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }

    tracing::info!(task_id = id, user_id = auth.user.id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Reject a `category_id` that does not exist or belongs to another user.
async fn ensure_category_owned(
    state: &AppState,
    user_id: DbId,
    category_id: DbId,
) -> AppResult<()> {
    CategoryRepo::find_one(&state.pool, user_id, category_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Unknown category".into()))?;
    Ok(())
}
