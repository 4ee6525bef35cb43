//! Route definitions for farm settings.

use axum::routing::get;
use axum::Router;

use crate::handlers::farm_settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET /settings  -> get (creates defaults on first access)
/// PUT /settings  -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/settings",
        get(farm_settings::get).put(farm_settings::update),
    )
}
