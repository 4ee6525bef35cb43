//! Route definitions for housing units.

use axum::routing::get;
use axum::Router;

use crate::handlers::housing;
use crate::state::AppState;

/// Routes mounted at `/housing`.
///
/// ```text
/// GET    /housing            -> list
/// POST   /housing            -> create
/// GET    /housing/occupancy  -> occupancy read model
/// GET    /housing/{id}       -> get_by_id
/// PUT    /housing/{id}       -> update
/// DELETE /housing/{id}       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/housing", get(housing::list).post(housing::create))
        .route("/housing/occupancy", get(housing::occupancy))
        .route(
            "/housing/{id}",
            get(housing::get_by_id)
                .put(housing::update)
                .delete(housing::delete),
        )
}
