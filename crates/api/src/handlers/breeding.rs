//! Handlers for breeding attempts, including the breeding recorder and
//! pregnancy-check workflows.
//!
//! The recorder is the canonical multi-step chain: insert the attempt,
//! insert the expected farrowing (+114 days), expand active `breeding`
//! protocols, publish the event. The steps are sequential awaited calls
//! with no compensating transaction; a failure stops the chain and earlier
//! writes stay committed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use farrowtrack_core::breeding::{
    expected_farrowing_date, validate_breeding_date, BreedingMethod, BreedingOutcome,
};
use farrowtrack_core::protocol::TriggerEvent;
use farrowtrack_core::types::DbId;
use farrowtrack_db::models::breeding::{BreedingAttempt, CreateBreedingAttempt, UpdateBreedingOutcome};
use farrowtrack_db::models::farrowing::Farrowing;
use farrowtrack_db::repositories::{BoarRepo, BreedingRepo, FarrowingRepo, SowRepo};
use farrowtrack_events::FarmEvent;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::expansion::expand_active_protocols;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response for the breeding recorder: the attempt plus the expected
/// farrowing it created.
#[derive(Debug, Serialize)]
pub struct BreedingRecorded {
    pub attempt: BreedingAttempt,
    pub farrowing: Farrowing,
    pub scheduled_tasks_created: usize,
}

/// GET /api/v1/sows/{sow_id}/breedings
pub async fn list_by_sow(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sow_id): Path<DbId>,
) -> AppResult<Json<Vec<BreedingAttempt>>> {
    let attempts = BreedingRepo::list_by_sow(&state.pool, user.organization_id, sow_id).await?;
    Ok(Json(attempts))
}

/// POST /api/v1/sows/{sow_id}/breedings
///
/// The breeding recorder workflow.
pub async fn record(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sow_id): Path<DbId>,
    Json(input): Json<CreateBreedingAttempt>,
) -> AppResult<(StatusCode, Json<BreedingRecorded>)> {
    // Validation before any write.
    BreedingMethod::parse(&input.method)?;
    let today = chrono::Utc::now().date_naive();
    validate_breeding_date(input.bred_at, today)?;

    let sow = SowRepo::find_by_id(&state.pool, user.organization_id, sow_id)
        .await?
        .ok_or(AppError::not_found("Sow", sow_id))?;

    if let Some(boar_id) = input.boar_id {
        BoarRepo::find_by_id(&state.pool, user.organization_id, boar_id)
            .await?
            .ok_or(AppError::not_found("Boar", boar_id))?;
    }

    // Step 1: the breeding attempt.
    let attempt = BreedingRepo::create(&state.pool, user.organization_id, sow.id, &input).await?;

    // Step 2: the expected farrowing, gestation ahead.
    let expected = expected_farrowing_date(attempt.bred_at);
    let farrowing = FarrowingRepo::create_expected(
        &state.pool,
        user.organization_id,
        sow.id,
        Some(attempt.id),
        expected,
    )
    .await?;

    // Step 3: expand active breeding protocols.
    let scheduled_tasks_created = expand_active_protocols(
        &state.pool,
        user.organization_id,
        TriggerEvent::Breeding,
        attempt.bred_at,
        Some(sow.id),
    )
    .await?;

    // Step 4: announce.
    state.event_bus.publish(
        FarmEvent::new("breeding.recorded")
            .for_organization(user.organization_id)
            .with_source("sow", sow.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "ear_tag": sow.ear_tag,
                "method": attempt.method,
                "bred_at": attempt.bred_at,
                "expected_farrowing": expected,
            })),
    );

    Ok((
        StatusCode::CREATED,
        Json(BreedingRecorded {
            attempt,
            farrowing,
            scheduled_tasks_created,
        }),
    ))
}

/// GET /api/v1/breedings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<BreedingAttempt>> {
    let attempt = BreedingRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("BreedingAttempt", id))?;
    Ok(Json(attempt))
}

/// PUT /api/v1/breedings/{id}/outcome
///
/// The pregnancy-check workflow. A negative result also deletes the
/// still-open expected farrowing so the due board stays honest.
pub async fn update_outcome(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBreedingOutcome>,
) -> AppResult<Json<BreedingAttempt>> {
    let outcome = BreedingOutcome::parse(&input.outcome)?;

    let attempt = BreedingRepo::update_outcome(
        &state.pool,
        user.organization_id,
        id,
        outcome.as_str(),
        input.notes.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("BreedingAttempt", id))?;

    match outcome {
        BreedingOutcome::Pregnant => {
            state.event_bus.publish(
                FarmEvent::new("pregnancy.confirmed")
                    .for_organization(user.organization_id)
                    .with_source("sow", attempt.sow_id)
                    .with_actor(user.user_id)
                    .with_payload(serde_json::json!({ "bred_at": attempt.bred_at })),
            );
        }
        BreedingOutcome::NotPregnant => {
            if let Some(open) =
                FarrowingRepo::find_open_by_attempt(&state.pool, user.organization_id, attempt.id)
                    .await?
            {
                FarrowingRepo::delete_open(&state.pool, user.organization_id, open.id).await?;
            }
        }
        BreedingOutcome::Pending => {}
    }

    Ok(Json(attempt))
}

/// GET /api/v1/breedings/pending-checks
///
/// Attempts whose pregnancy check is due (bred >= 18 days ago, still
/// pending).
pub async fn pending_checks(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<BreedingAttempt>>> {
    let cutoff = chrono::Utc::now().date_naive()
        - chrono::Duration::days(farrowtrack_core::breeding::PREGNANCY_CHECK_MIN_DAYS);
    let due = BreedingRepo::list_pending_checks(&state.pool, user.organization_id, cutoff).await?;
    Ok(Json(due))
}

/// DELETE /api/v1/breedings/{id}
///
/// Removes the attempt and its still-open expected farrowing.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if let Some(open) =
        FarrowingRepo::find_open_by_attempt(&state.pool, user.organization_id, id).await?
    {
        FarrowingRepo::delete_open(&state.pool, user.organization_id, open.id).await?;
    }

    let deleted = BreedingRepo::delete(&state.pool, user.organization_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("BreedingAttempt", id))
    }
}
