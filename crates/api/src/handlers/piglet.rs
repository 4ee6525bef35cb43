//! Handlers for the `/piglets` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use farrowtrack_core::ear_notch::validate_notch;
use farrowtrack_core::types::DbId;
use farrowtrack_core::validation::PigletStatus;
use farrowtrack_db::models::piglet::{CreatePiglet, Piglet, UpdatePiglet};
use farrowtrack_db::repositories::{FarrowingRepo, PigletRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/farrowings/{farrowing_id}/piglets
pub async fn list_by_farrowing(
    State(state): State<AppState>,
    user: AuthUser,
    Path(farrowing_id): Path<DbId>,
) -> AppResult<Json<Vec<Piglet>>> {
    let piglets =
        PigletRepo::list_by_farrowing(&state.pool, user.organization_id, farrowing_id).await?;
    Ok(Json(piglets))
}

/// POST /api/v1/farrowings/{farrowing_id}/piglets
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(farrowing_id): Path<DbId>,
    Json(input): Json<CreatePiglet>,
) -> AppResult<(StatusCode, Json<Piglet>)> {
    validate_notch(input.ear_notch_right, "Right")?;
    validate_notch(input.ear_notch_left, "Left")?;
    if let Some(status) = input.status.as_deref() {
        PigletStatus::parse(status)?;
    }

    FarrowingRepo::find_by_id(&state.pool, user.organization_id, farrowing_id)
        .await?
        .ok_or(AppError::not_found("Farrowing", farrowing_id))?;

    let piglet = PigletRepo::create(&state.pool, user.organization_id, farrowing_id, &input).await?;
    Ok((StatusCode::CREATED, Json(piglet)))
}

/// GET /api/v1/piglets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Piglet>> {
    let piglet = PigletRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Piglet", id))?;
    Ok(Json(piglet))
}

/// PUT /api/v1/piglets/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePiglet>,
) -> AppResult<Json<Piglet>> {
    if let Some(status) = input.status.as_deref() {
        PigletStatus::parse(status)?;
    }
    let piglet = PigletRepo::update(&state.pool, user.organization_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Piglet", id))?;
    Ok(Json(piglet))
}

/// DELETE /api/v1/piglets/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PigletRepo::delete(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Piglet", id))
    }
}
