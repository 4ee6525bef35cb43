//! Handlers for the dashboard read models.

use axum::extract::{Query, State};
use axum::Json;
use farrowtrack_core::validation::AnimalStatus;
use farrowtrack_db::models::dashboard::{HerdStats, SowOverview};
use farrowtrack_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::StatusFilter;
use crate::state::AppState;

/// GET /api/v1/dashboard/sows
///
/// The aggregated sow list: latest breeding, parity, pregnancy-check flag,
/// next expected farrowing.
pub async fn sow_overview(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<SowOverview>>> {
    if let Some(status) = filter.status.as_deref() {
        AnimalStatus::parse(status)?;
    }
    let overview = DashboardRepo::sow_overview(
        &state.pool,
        user.organization_id,
        filter.status.as_deref(),
    )
    .await?;
    Ok(Json(overview))
}

/// GET /api/v1/dashboard/stats
pub async fn herd_stats(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<HerdStats>> {
    let stats = DashboardRepo::herd_stats(&state.pool, user.organization_id).await?;
    Ok(Json(stats))
}
