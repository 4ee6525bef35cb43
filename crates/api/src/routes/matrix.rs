//! Route definitions for Matrix synchronization treatments.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::matrix;
use crate::state::AppState;

/// Routes mounted at `/matrix`.
///
/// ```text
/// POST   /matrix                 -> create treatment
/// GET    /matrix/batches         -> batch view (grouped by batch_name)
/// GET    /matrix/{id}            -> get_by_id
/// PUT    /matrix/{id}            -> update
/// DELETE /matrix/{id}            -> delete
/// POST   /matrix/{id}/mark-bred  -> mark-as-bred workflow
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/matrix", post(matrix::create))
        .route("/matrix/batches", get(matrix::batches))
        .route(
            "/matrix/{id}",
            get(matrix::get_by_id)
                .put(matrix::update)
                .delete(matrix::delete),
        )
        .route("/matrix/{id}/mark-bred", post(matrix::mark_bred))
}
