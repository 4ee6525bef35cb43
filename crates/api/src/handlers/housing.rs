//! Handlers for housing units and the occupancy read model.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use farrowtrack_core::error::CoreError;
use farrowtrack_core::housing::UnitType;
use farrowtrack_core::types::DbId;
use farrowtrack_db::models::dashboard::HousingOccupancy;
use farrowtrack_db::models::housing::{CreateHousingUnit, HousingUnit, UpdateHousingUnit};
use farrowtrack_db::repositories::HousingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/housing
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<HousingUnit>>> {
    let units = HousingRepo::list_by_organization(&state.pool, user.organization_id).await?;
    Ok(Json(units))
}

/// GET /api/v1/housing/occupancy
pub async fn occupancy(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<HousingOccupancy>>> {
    let occupancy = HousingRepo::occupancy(&state.pool, user.organization_id).await?;
    Ok(Json(occupancy))
}

/// POST /api/v1/housing
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateHousingUnit>,
) -> AppResult<(StatusCode, Json<HousingUnit>)> {
    UnitType::parse(&input.unit_type)?;
    if input.capacity < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Capacity cannot be negative".into(),
        )));
    }
    let unit = HousingRepo::create(&state.pool, user.organization_id, &input).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

/// GET /api/v1/housing/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<HousingUnit>> {
    let unit = HousingRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("HousingUnit", id))?;
    Ok(Json(unit))
}

/// PUT /api/v1/housing/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHousingUnit>,
) -> AppResult<Json<HousingUnit>> {
    if let Some(unit_type) = input.unit_type.as_deref() {
        UnitType::parse(unit_type)?;
    }
    let unit = HousingRepo::update(&state.pool, user.organization_id, id, &input)
        .await?
        .ok_or(AppError::not_found("HousingUnit", id))?;
    Ok(Json(unit))
}

/// DELETE /api/v1/housing/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = HousingRepo::delete(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("HousingUnit", id))
    }
}
