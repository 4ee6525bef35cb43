//! Handlers for the `/sows` resource: CRUD, housing transfer, CSV export.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use farrowtrack_core::error::CoreError;
use farrowtrack_core::export::{write_sows_csv, SowExportRow};
use farrowtrack_core::housing::validate_capacity;
use farrowtrack_core::types::DbId;
use farrowtrack_core::validation::{validate_ear_tag, AnimalStatus};
use farrowtrack_db::models::sow::{CreateSow, Sow, UpdateSow};
use farrowtrack_db::repositories::{HousingRepo, SowRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::StatusFilter;
use crate::state::AppState;

/// Request body for `POST /sows/{id}/transfer`.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Target unit; `null` moves the sow out of housing entirely.
    pub housing_unit_id: Option<DbId>,
}

/// GET /api/v1/sows
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<Sow>>> {
    if let Some(status) = filter.status.as_deref() {
        AnimalStatus::parse(status)?;
    }
    let sows =
        SowRepo::list_by_organization(&state.pool, user.organization_id, filter.status.as_deref())
            .await?;
    Ok(Json(sows))
}

/// POST /api/v1/sows
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateSow>,
) -> AppResult<(StatusCode, Json<Sow>)> {
    validate_create(&input)?;
    let sow = SowRepo::create(&state.pool, user.organization_id, &input).await?;
    Ok((StatusCode::CREATED, Json(sow)))
}

/// GET /api/v1/sows/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Sow>> {
    let sow = SowRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Sow", id))?;
    Ok(Json(sow))
}

/// PUT /api/v1/sows/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSow>,
) -> AppResult<Json<Sow>> {
    if let Some(tag) = input.ear_tag.as_deref() {
        validate_ear_tag(tag)?;
    }
    if let Some(status) = input.status.as_deref() {
        AnimalStatus::parse(status)?;
    }
    let sow = SowRepo::update(&state.pool, user.organization_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Sow", id))?;
    Ok(Json(sow))
}

/// DELETE /api/v1/sows/{id}
///
/// Dependent breeding attempts, farrowings, piglets, and matrix
/// treatments are removed with the sow.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SowRepo::delete(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Sow", id))
    }
}

/// POST /api/v1/sows/{id}/transfer
///
/// Move a sow into a housing unit after a capacity check, or out of
/// housing when `housing_unit_id` is null.
pub async fn transfer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<TransferRequest>,
) -> AppResult<Json<Sow>> {
    if let Some(unit_id) = input.housing_unit_id {
        let unit = HousingRepo::find_by_id(&state.pool, user.organization_id, unit_id)
            .await?
            .ok_or(AppError::not_found("HousingUnit", unit_id))?;
        let occupants = SowRepo::count_in_unit(&state.pool, unit.id).await?;
        validate_capacity(occupants, unit.capacity)?;
    }

    let sow = SowRepo::assign_housing(&state.pool, user.organization_id, id, input.housing_unit_id)
        .await?
        .ok_or(AppError::not_found("Sow", id))?;
    Ok(Json(sow))
}

/// GET /api/v1/sows/export
///
/// Download the herd as CSV with the standard import column set.
pub async fn export(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let sows = SowRepo::list_by_organization(&state.pool, user.organization_id, None).await?;

    let rows: Vec<SowExportRow> = sows
        .into_iter()
        .map(|s| SowExportRow {
            ear_tag: s.ear_tag,
            name: s.name,
            birth_date: Some(s.birth_date),
            breed: s.breed,
            status: s.status,
            right_ear_notch: s.right_ear_notch,
            left_ear_notch: s.left_ear_notch,
            registration_number: s.registration_number,
            notes: s.notes,
        })
        .collect();

    let csv_bytes = write_sows_csv(&rows)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sows.csv\"",
            ),
        ],
        csv_bytes,
    ))
}

fn validate_create(input: &CreateSow) -> Result<(), AppError> {
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
    Ok(())
}
