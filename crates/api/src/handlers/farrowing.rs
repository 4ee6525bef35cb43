//! Handlers for farrowings: outcome recording and the weaning workflow.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use farrowtrack_core::ear_notch::assign_notches;
use farrowtrack_core::error::CoreError;
use farrowtrack_core::protocol::TriggerEvent;
use farrowtrack_core::types::DbId;
use farrowtrack_core::validation::PigletStatus;
use farrowtrack_db::models::farrowing::{Farrowing, RecordFarrowing, WeanLitter};
use farrowtrack_db::models::piglet::CreatePiglet;
use farrowtrack_db::repositories::{FarrowingRepo, PigletRepo};
use farrowtrack_events::FarmEvent;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::expansion::expand_active_protocols;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for the due board (`GET /farrowings/due`).
#[derive(Debug, Deserialize)]
pub struct DueWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Response for the weaning workflow.
#[derive(Debug, Serialize)]
pub struct LitterWeaned {
    pub farrowing: Farrowing,
    pub piglets_weaned: u64,
    pub piglets_created: usize,
    pub scheduled_tasks_created: usize,
}

/// GET /api/v1/sows/{sow_id}/farrowings
pub async fn list_by_sow(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sow_id): Path<DbId>,
) -> AppResult<Json<Vec<Farrowing>>> {
    let farrowings = FarrowingRepo::list_by_sow(&state.pool, user.organization_id, sow_id).await?;
    Ok(Json(farrowings))
}

/// GET /api/v1/farrowings/due
///
/// Open farrowings expected in the window (defaults to the next 7 days).
pub async fn due(
    State(state): State<AppState>,
    user: AuthUser,
    Query(window): Query<DueWindow>,
) -> AppResult<Json<Vec<Farrowing>>> {
    let today = chrono::Utc::now().date_naive();
    let from = window.from.unwrap_or(today);
    let to = window.to.unwrap_or(today + chrono::Duration::days(7));
    let farrowings =
        FarrowingRepo::list_due_between(&state.pool, user.organization_id, from, to).await?;
    Ok(Json(farrowings))
}

/// GET /api/v1/farrowings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Farrowing>> {
    let farrowing = FarrowingRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Farrowing", id))?;
    Ok(Json(farrowing))
}

/// POST /api/v1/farrowings/{id}/record
///
/// Record the farrowing outcome: actual date, litter counts, and a newly
/// allocated litter number. Nursing piglet rows are created for the
/// live-born count with ear notches assigned, then active `farrowing`
/// protocols expand.
pub async fn record_outcome(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<RecordFarrowing>,
) -> AppResult<Json<Farrowing>> {
    if input.live_born < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Live-born count cannot be negative".into(),
        )));
    }

    let existing = FarrowingRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Farrowing", id))?;
    if existing.actual_date.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Farrowing outcome has already been recorded".into(),
        )));
    }

    // Step 1: stamp the outcome and allocate the litter number.
    let farrowing = FarrowingRepo::record_outcome(&state.pool, user.organization_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Farrowing", id))?;

    // Step 2: create nursing piglet rows with notch identities.
    let litter_number = farrowing.litter_number.unwrap_or_default();
    for notch in assign_notches(litter_number, 1, input.live_born as usize) {
        PigletRepo::create(
            &state.pool,
            user.organization_id,
            farrowing.id,
            &CreatePiglet {
                ear_notch_right: notch.right,
                ear_notch_left: notch.left,
                sex: None,
                status: None,
                notes: None,
            },
        )
        .await?;
    }

    // Step 3: expand active farrowing protocols.
    expand_active_protocols(
        &state.pool,
        user.organization_id,
        TriggerEvent::Farrowing,
        input.actual_date,
        Some(farrowing.sow_id),
    )
    .await?;

    // Step 4: announce.
    state.event_bus.publish(
        FarmEvent::new("farrowing.recorded")
            .for_organization(user.organization_id)
            .with_source("farrowing", farrowing.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "sow_id": farrowing.sow_id,
                "actual_date": input.actual_date,
                "live_born": input.live_born,
                "stillborn": input.stillborn,
                "litter_number": litter_number,
            })),
    );

    Ok(Json(farrowing))
}

/// POST /api/v1/farrowings/{id}/wean
///
/// The weaning workflow: reconcile nursing piglet rows against the target
/// count (live-born, unless overridden), flip them to `weaned`, insert any
/// shortfall with fresh ear notches, stamp the farrowing, expand `weaning`
/// protocols, and publish `litter.weaned`.
pub async fn wean(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<WeanLitter>,
) -> AppResult<Json<LitterWeaned>> {
    let farrowing = FarrowingRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Farrowing", id))?;

    if farrowing.actual_date.is_none() {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot wean a litter before the farrowing is recorded".into(),
        )));
    }
    if farrowing.weaning_date.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Litter has already been weaned".into(),
        )));
    }

    let target = input
        .weaned_count
        .or(farrowing.live_born)
        .unwrap_or_default()
        .max(0);

    // Step 1: flip the existing nursing rows.
    let piglets_weaned =
        PigletRepo::wean_nursing(&state.pool, user.organization_id, farrowing.id).await?;

    // Step 2: insert the shortfall as already-weaned piglets, continuing
    // the left-ear sequence.
    let shortfall = (target as i64 - piglets_weaned as i64).max(0) as usize;
    let mut piglets_created = 0;
    if shortfall > 0 {
        let litter_number = farrowing.litter_number.unwrap_or_default();
        let next_seq =
            PigletRepo::max_sequence(&state.pool, user.organization_id, farrowing.id).await? + 1;
        for notch in assign_notches(litter_number, next_seq, shortfall) {
            PigletRepo::create(
                &state.pool,
                user.organization_id,
                farrowing.id,
                &CreatePiglet {
                    ear_notch_right: notch.right,
                    ear_notch_left: notch.left,
                    sex: None,
                    status: Some(PigletStatus::Weaned.as_str().to_string()),
                    notes: None,
                },
            )
            .await?;
            piglets_created += 1;
        }
    }

    // Step 3: stamp the farrowing.
    let farrowing = FarrowingRepo::record_weaning(
        &state.pool,
        user.organization_id,
        farrowing.id,
        input.weaning_date,
        target,
    )
    .await?
    .ok_or(AppError::not_found("Farrowing", id))?;

    // Step 4: expand active weaning protocols.
    let scheduled_tasks_created = expand_active_protocols(
        &state.pool,
        user.organization_id,
        TriggerEvent::Weaning,
        input.weaning_date,
        Some(farrowing.sow_id),
    )
    .await?;

    // Step 5: announce.
    state.event_bus.publish(
        FarmEvent::new("litter.weaned")
            .for_organization(user.organization_id)
            .with_source("farrowing", farrowing.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "sow_id": farrowing.sow_id,
                "weaning_date": input.weaning_date,
                "weaned_count": target,
            })),
    );

    Ok(Json(LitterWeaned {
        farrowing,
        piglets_weaned,
        piglets_created,
        scheduled_tasks_created,
    }))
}
