//! Handlers for protocols and their task templates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use farrowtrack_core::error::CoreError;
use farrowtrack_core::protocol::TriggerEvent;
use farrowtrack_core::types::DbId;
use farrowtrack_db::models::protocol::{
    CreateProtocol, CreateProtocolTask, Protocol, ProtocolTask, UpdateProtocol, UpdateProtocolTask,
};
use farrowtrack_db::repositories::ProtocolRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// A protocol with its task templates, as the editor screen wants it.
#[derive(Debug, Serialize)]
pub struct ProtocolWithTasks {
    #[serde(flatten)]
    pub protocol: Protocol,
    pub tasks: Vec<ProtocolTask>,
}

/// GET /api/v1/protocols
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<ProtocolWithTasks>>> {
    let protocols = ProtocolRepo::list_by_organization(&state.pool, user.organization_id).await?;

    let mut result = Vec::with_capacity(protocols.len());
    for protocol in protocols {
        let tasks = ProtocolRepo::list_tasks(&state.pool, protocol.id).await?;
        result.push(ProtocolWithTasks { protocol, tasks });
    }
    Ok(Json(result))
}

/// POST /api/v1/protocols
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProtocol>,
) -> AppResult<(StatusCode, Json<Protocol>)> {
    TriggerEvent::parse(&input.trigger_event)?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Protocol name cannot be empty".into(),
        )));
    }
    let protocol = ProtocolRepo::create(&state.pool, user.organization_id, &input).await?;
    Ok((StatusCode::CREATED, Json(protocol)))
}

/// GET /api/v1/protocols/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProtocolWithTasks>> {
    let protocol = ProtocolRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Protocol", id))?;
    let tasks = ProtocolRepo::list_tasks(&state.pool, protocol.id).await?;
    Ok(Json(ProtocolWithTasks { protocol, tasks }))
}

/// PUT /api/v1/protocols/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProtocol>,
) -> AppResult<Json<Protocol>> {
    if let Some(trigger) = input.trigger_event.as_deref() {
        TriggerEvent::parse(trigger)?;
    }
    let protocol = ProtocolRepo::update(&state.pool, user.organization_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Protocol", id))?;
    Ok(Json(protocol))
}

/// DELETE /api/v1/protocols/{id}
///
/// Rejected with 409 while any scheduled task expanded from this protocol
/// is still outstanding.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ProtocolRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Protocol", id))?;

    if ProtocolRepo::has_outstanding_tasks(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot delete a protocol with outstanding scheduled tasks".into(),
        )));
    }

    let deleted = ProtocolRepo::delete(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Protocol", id))
    }
}

// -- Task templates --

/// POST /api/v1/protocols/{id}/tasks
pub async fn create_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProtocolTask>,
) -> AppResult<(StatusCode, Json<ProtocolTask>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task title cannot be empty".into(),
        )));
    }
    ProtocolRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Protocol", id))?;

    let task = ProtocolRepo::create_task(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/v1/protocols/{id}/tasks/{task_id}
pub async fn update_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, task_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProtocolTask>,
) -> AppResult<Json<ProtocolTask>> {
    ProtocolRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Protocol", id))?;

    let task = ProtocolRepo::update_task(&state.pool, id, task_id, &input)
        .await?
        .ok_or(AppError::not_found("ProtocolTask", task_id))?;
    Ok(Json(task))
}

/// DELETE /api/v1/protocols/{id}/tasks/{task_id}
pub async fn delete_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ProtocolRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Protocol", id))?;

    let deleted = ProtocolRepo::delete_task(&state.pool, id, task_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ProtocolTask", task_id))
    }
}
