//! Handlers for Matrix synchronization treatments and the batch view.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use farrowtrack_core::breeding::{validate_breeding_date, BreedingMethod};
use farrowtrack_core::error::CoreError;
use farrowtrack_core::matrix::{days_until_heat, expected_heat_date, validate_course_dates};
use farrowtrack_core::protocol::TriggerEvent;
use farrowtrack_core::types::DbId;
use farrowtrack_db::models::breeding::CreateBreedingAttempt;
use farrowtrack_db::models::matrix::{
    CreateMatrixTreatment, MatrixTreatment, UpdateMatrixTreatment,
};
use farrowtrack_db::repositories::{BreedingRepo, FarrowingRepo, MatrixRepo, SowRepo};
use farrowtrack_events::FarmEvent;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::expansion::expand_active_protocols;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// One sow's treatment within a batch, with the display offset.
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    #[serde(flatten)]
    pub treatment: MatrixTreatment,
    /// Days until the expected heat (negative = overdue).
    pub days_to_heat: i64,
}

/// A named synchronization batch.
#[derive(Debug, Serialize)]
pub struct MatrixBatch {
    pub batch_name: String,
    pub treatments: Vec<BatchEntry>,
}

/// Request body for `POST /matrix/{id}/mark-bred`.
#[derive(Debug, Deserialize)]
pub struct MarkBredRequest {
    pub boar_id: Option<DbId>,
    pub boar_description: Option<String>,
    /// `natural` or `ai`.
    pub method: String,
    pub bred_at: chrono::NaiveDate,
    pub actual_heat_date: Option<chrono::NaiveDate>,
}

/// GET /api/v1/matrix/batches
///
/// Treatments grouped by `batch_name`, each with its day offset to the
/// expected heat date.
pub async fn batches(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<MatrixBatch>>> {
    let treatments = MatrixRepo::list_by_organization(&state.pool, user.organization_id).await?;
    let today = chrono::Utc::now().date_naive();

    let mut grouped: BTreeMap<String, Vec<BatchEntry>> = BTreeMap::new();
    for treatment in treatments {
        let days_to_heat = days_until_heat(treatment.expected_heat_date, today);
        grouped
            .entry(treatment.batch_name.clone())
            .or_default()
            .push(BatchEntry {
                treatment,
                days_to_heat,
            });
    }

    let batches = grouped
        .into_iter()
        .map(|(batch_name, treatments)| MatrixBatch {
            batch_name,
            treatments,
        })
        .collect();

    Ok(Json(batches))
}

/// POST /api/v1/matrix
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateMatrixTreatment>,
) -> AppResult<(StatusCode, Json<MatrixTreatment>)> {
    validate_course_dates(input.start_date, input.last_dose_date)?;
    if input.batch_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Batch name cannot be empty".into(),
        )));
    }

    SowRepo::find_by_id(&state.pool, user.organization_id, input.sow_id)
        .await?
        .ok_or(AppError::not_found("Sow", input.sow_id))?;

    let expected = input
        .expected_heat_date
        .unwrap_or_else(|| expected_heat_date(input.last_dose_date));

    let treatment =
        MatrixRepo::create(&state.pool, user.organization_id, &input, expected).await?;
    Ok((StatusCode::CREATED, Json(treatment)))
}

/// GET /api/v1/matrix/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MatrixTreatment>> {
    let treatment = MatrixRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("MatrixTreatment", id))?;
    Ok(Json(treatment))
}

/// PUT /api/v1/matrix/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMatrixTreatment>,
) -> AppResult<Json<MatrixTreatment>> {
    let treatment = MatrixRepo::update(&state.pool, user.organization_id, id, &input)
        .await?
        .ok_or(AppError::not_found("MatrixTreatment", id))?;
    Ok(Json(treatment))
}

/// DELETE /api/v1/matrix/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MatrixRepo::delete(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("MatrixTreatment", id))
    }
}

/// POST /api/v1/matrix/{id}/mark-bred
///
/// Record a breeding for a synchronized sow: runs the full breeding
/// recorder chain (attempt, expected farrowing, `breeding` protocol
/// expansion), then sets the treatment's `bred` flag.
pub async fn mark_bred(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<MarkBredRequest>,
) -> AppResult<Json<MatrixTreatment>> {
    BreedingMethod::parse(&input.method)?;
    let today = chrono::Utc::now().date_naive();
    validate_breeding_date(input.bred_at, today)?;

    let treatment = MatrixRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("MatrixTreatment", id))?;

    if treatment.bred {
        return Err(AppError::Core(CoreError::Conflict(
            "Treatment is already marked as bred".into(),
        )));
    }

    // Step 1: the breeding attempt.
    let attempt = BreedingRepo::create(
        &state.pool,
        user.organization_id,
        treatment.sow_id,
        &CreateBreedingAttempt {
            boar_id: input.boar_id,
            boar_description: input.boar_description.clone(),
            method: input.method.clone(),
            bred_at: input.bred_at,
            notes: Some(format!("Matrix batch {}", treatment.batch_name)),
        },
    )
    .await?;

    // Step 2: the expected farrowing.
    FarrowingRepo::create_expected(
        &state.pool,
        user.organization_id,
        treatment.sow_id,
        Some(attempt.id),
        farrowtrack_core::breeding::expected_farrowing_date(attempt.bred_at),
    )
    .await?;

    // Step 3: expand active breeding protocols.
    expand_active_protocols(
        &state.pool,
        user.organization_id,
        TriggerEvent::Breeding,
        attempt.bred_at,
        Some(treatment.sow_id),
    )
    .await?;

    // Step 4: flip the treatment flag.
    let treatment = MatrixRepo::mark_bred(
        &state.pool,
        user.organization_id,
        id,
        input.actual_heat_date,
    )
    .await?
    .ok_or(AppError::not_found("MatrixTreatment", id))?;

    // Step 5: announce.
    state.event_bus.publish(
        FarmEvent::new("matrix.bred")
            .for_organization(user.organization_id)
            .with_source("matrix_treatment", treatment.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "batch_name": treatment.batch_name,
                "sow_id": treatment.sow_id,
                "bred_at": input.bred_at,
            })),
    );

    Ok(Json(treatment))
}
