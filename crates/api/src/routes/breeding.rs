//! Route definitions for breeding attempts, farrowings, and piglets.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{breeding, farrowing, piglet};
use crate::state::AppState;

/// Routes mounted at `/breedings`, `/farrowings`, and `/piglets`.
///
/// ```text
/// GET    /breedings/pending-checks        -> attempts due a pregnancy check
/// GET    /breedings/{id}                  -> get_by_id
/// PUT    /breedings/{id}/outcome          -> pregnancy-check workflow
/// DELETE /breedings/{id}                  -> delete
///
/// GET    /farrowings/due                  -> due board (?from=&to=)
/// GET    /farrowings/{id}                 -> get_by_id
/// POST   /farrowings/{id}/record          -> farrowing outcome workflow
/// POST   /farrowings/{id}/wean            -> weaning workflow
/// GET    /farrowings/{farrowing_id}/piglets -> list piglets
/// POST   /farrowings/{farrowing_id}/piglets -> create piglet
///
/// GET    /piglets/{id}                    -> get_by_id
/// PUT    /piglets/{id}                    -> update
/// DELETE /piglets/{id}                    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/breedings/pending-checks", get(breeding::pending_checks))
        .route(
            "/breedings/{id}",
            get(breeding::get_by_id).delete(breeding::delete),
        )
        .route("/breedings/{id}/outcome", put(breeding::update_outcome))
        .route("/farrowings/due", get(farrowing::due))
        .route("/farrowings/{id}", get(farrowing::get_by_id))
        .route("/farrowings/{id}/record", post(farrowing::record_outcome))
        .route("/farrowings/{id}/wean", post(farrowing::wean))
        .route(
            "/farrowings/{farrowing_id}/piglets",
            get(piglet::list_by_farrowing).post(piglet::create),
        )
        .route(
            "/piglets/{id}",
            get(piglet::get_by_id)
                .put(piglet::update)
                .delete(piglet::delete),
        )
}
