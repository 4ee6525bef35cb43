//! Handlers for the `/tasks` resource (scheduled tasks).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use farrowtrack_core::error::CoreError;
use farrowtrack_core::types::DbId;
use farrowtrack_db::models::scheduled_task::{CreateScheduledTask, ScheduledTask};
use farrowtrack_db::repositories::ScheduledTaskRepo;
use farrowtrack_events::FarmEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::TaskFilter;
use crate::state::AppState;

/// GET /api/v1/tasks
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<TaskFilter>,
) -> AppResult<Json<Vec<ScheduledTask>>> {
    let tasks = ScheduledTaskRepo::list_by_organization(
        &state.pool,
        user.organization_id,
        filter.due_before,
        filter.include_completed,
    )
    .await?;
    Ok(Json(tasks))
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateScheduledTask>,
) -> AppResult<(StatusCode, Json<ScheduledTask>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task title cannot be empty".into(),
        )));
    }
    let task = ScheduledTaskRepo::create(&state.pool, user.organization_id, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ScheduledTask>> {
    let task = ScheduledTaskRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("ScheduledTask", id))?;
    Ok(Json(task))
}

/// POST /api/v1/tasks/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ScheduledTask>> {
    let task = ScheduledTaskRepo::complete(&state.pool, user.organization_id, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Task not found or already completed".into(),
            ))
        })?;

    state.event_bus.publish(
        FarmEvent::new("task.completed")
            .for_organization(user.organization_id)
            .with_source("scheduled_task", task.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({ "title": task.title })),
    );

    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ScheduledTaskRepo::delete(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ScheduledTask", id))
    }
}
