//! Route tree for the API.
//!
//! Each submodule owns one resource's router; [`api_routes`] composes
//! them under `/api/v1`.

pub mod auth;
pub mod breeding;
pub mod dashboard;
pub mod finance;
pub mod health;
pub mod herd;
pub mod housing;
pub mod matrix;
pub mod notifications;
pub mod protocols;
pub mod settings;
pub mod users;

use axum::routing::any;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ws                         WebSocket upgrade (token in query string)
///
/// /auth/...                   login, refresh, logout
/// /users/...                  organization membership (owner only)
///
/// /sows/...                   sow CRUD, import/export, photos, transfer
/// /boars/...                  boar CRUD, photos
/// /breedings/...              pregnancy checks and attempt management
/// /farrowings/...             outcome recording, weaning, piglets
/// /piglets/...                individual piglet management
/// /matrix/...                 synchronization batches
/// /protocols/...              protocol templates and their tasks
/// /tasks/...                  scheduled tasks
/// /budgets, /expenses, /income  ledger
/// /housing/...                housing units and occupancy
/// /settings                   farm settings
/// /notifications/...          notifications, preferences, settings
/// /dashboard/...              read models
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", any(ws::ws_handler))
        .merge(auth::router())
        .merge(users::router())
        .merge(herd::router())
        .merge(breeding::router())
        .merge(matrix::router())
        .merge(protocols::router())
        .merge(finance::router())
        .merge(housing::router())
        .merge(settings::router())
        .merge(notifications::router())
        .merge(dashboard::router())
}
