//! Route definitions for organization membership (owner only).

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /users       -> list
/// POST /users       -> create
/// PUT  /users/{id}  -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", put(users::update))
}
