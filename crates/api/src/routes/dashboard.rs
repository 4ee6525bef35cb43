//! Route definitions for the dashboard read models.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /dashboard/sows   -> aggregated sow list (?status=)
/// GET /dashboard/stats  -> herd counters
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/sows", get(dashboard::sow_overview))
        .route("/dashboard/stats", get(dashboard::herd_stats))
}
