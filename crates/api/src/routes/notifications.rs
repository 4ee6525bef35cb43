//! Route definitions for notifications and preferences.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET  /notifications              -> list (?unread_only=&limit=)
/// POST /notifications/{id}/read    -> mark one read
/// POST /notifications/read-all     -> mark all read
/// GET  /notifications/event-types  -> event-type catalogue
/// GET  /notifications/preferences  -> per-event-type preferences
/// PUT  /notifications/preferences  -> upsert a preference
/// GET  /notifications/settings     -> DND/digest settings
/// PUT  /notifications/settings     -> update DND/digest settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notification::list))
        .route("/notifications/{id}/read", post(notification::mark_read))
        .route("/notifications/read-all", post(notification::mark_all_read))
        .route("/notifications/event-types", get(notification::event_types))
        .route(
            "/notifications/preferences",
            get(notification::list_preferences).put(notification::upsert_preference),
        )
        .route(
            "/notifications/settings",
            get(notification::get_settings).put(notification::update_settings),
        )
}
