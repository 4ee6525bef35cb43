//! Handlers for the `/boars` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use farrowtrack_core::error::CoreError;
use farrowtrack_core::types::DbId;
use farrowtrack_core::validation::{validate_ear_tag, AnimalStatus};
use farrowtrack_db::models::boar::{Boar, CreateBoar, UpdateBoar};
use farrowtrack_db::repositories::BoarRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::StatusFilter;
use crate::state::AppState;

/// GET /api/v1/boars
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<Boar>>> {
    if let Some(status) = filter.status.as_deref() {
        AnimalStatus::parse(status)?;
    }
    let boars =
        BoarRepo::list_by_organization(&state.pool, user.organization_id, filter.status.as_deref())
            .await?;
    Ok(Json(boars))
}

/// POST /api/v1/boars
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateBoar>,
) -> AppResult<(StatusCode, Json<Boar>)> {
    if let Some(tag) = input.ear_tag.as_deref() {
        validate_ear_tag(tag)?;
    }
    if let Some(status) = input.status.as_deref() {
        AnimalStatus::parse(status)?;
    }
    if input.breed.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Breed cannot be empty".into(),
        )));
    }
    let boar = BoarRepo::create(&state.pool, user.organization_id, &input).await?;
    Ok((StatusCode::CREATED, Json(boar)))
}

/// GET /api/v1/boars/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Boar>> {
    let boar = BoarRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Boar", id))?;
    Ok(Json(boar))
}

/// PUT /api/v1/boars/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBoar>,
) -> AppResult<Json<Boar>> {
    if let Some(tag) = input.ear_tag.as_deref() {
        validate_ear_tag(tag)?;
    }
    if let Some(status) = input.status.as_deref() {
        AnimalStatus::parse(status)?;
    }
    let boar = BoarRepo::update(&state.pool, user.organization_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Boar", id))?;
    Ok(Json(boar))
}

/// DELETE /api/v1/boars/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BoarRepo::delete(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Boar", id))
    }
}
