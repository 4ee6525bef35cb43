//! Handlers for notifications, preferences, and notification settings.

use axum::extract::{Path, Query, State};
use axum::Json;
use farrowtrack_core::channels::is_valid_channel;
use farrowtrack_core::error::CoreError;
use farrowtrack_core::types::DbId;
use farrowtrack_db::models::event::EventType;
use farrowtrack_db::models::notification::{
    Notification, NotificationPreference, UpdateNotificationSettings, UpsertPreference,
    UserNotificationSettings,
};
use farrowtrack_db::repositories::{EventRepo, NotificationPreferenceRepo, NotificationRepo};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::NotificationFilter;
use crate::state::AppState;

/// Default page size for the notification list.
const DEFAULT_LIMIT: i64 = 50;

/// GET /api/v1/notifications
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<NotificationFilter>,
) -> AppResult<Json<Vec<Notification>>> {
    let limit = filter.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 200);
    let notifications =
        NotificationRepo::list_for_user(&state.pool, user.user_id, filter.unread_only, limit)
            .await?;
    Ok(Json(notifications))
}

/// POST /api/v1/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let changed = NotificationRepo::mark_read(&state.pool, user.user_id, id).await?;
    if !changed {
        return Err(AppError::not_found("Notification", id));
    }
    Ok(Json(json!({ "read": true })))
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "marked_read": count })))
}

/// GET /api/v1/notifications/event-types
///
/// The catalogue the preferences screen renders toggles for.
pub async fn event_types(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<EventType>>> {
    let types = EventRepo::list_event_types(&state.pool).await?;
    Ok(Json(types))
}

/// GET /api/v1/notifications/preferences
pub async fn list_preferences(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<NotificationPreference>>> {
    let prefs = NotificationPreferenceRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(prefs))
}

/// PUT /api/v1/notifications/preferences
pub async fn upsert_preference(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpsertPreference>,
) -> AppResult<Json<NotificationPreference>> {
    let channels = input.channels.unwrap_or_else(|| json!(["in_app"]));

    let names: Vec<String> = serde_json::from_value(channels.clone()).map_err(|_| {
        AppError::Core(CoreError::Validation(
            "Channels must be an array of channel names".into(),
        ))
    })?;
    for name in &names {
        if !is_valid_channel(name) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown channel '{name}'"
            ))));
        }
    }

    let pref = NotificationPreferenceRepo::upsert(
        &state.pool,
        user.user_id,
        input.event_type_id,
        input.is_enabled,
        &channels,
    )
    .await?;
    Ok(Json(pref))
}

/// GET /api/v1/notifications/settings
pub async fn get_settings(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Option<UserNotificationSettings>>> {
    let settings = NotificationPreferenceRepo::get_settings(&state.pool, user.user_id).await?;
    Ok(Json(settings))
}

/// PUT /api/v1/notifications/settings
pub async fn update_settings(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateNotificationSettings>,
) -> AppResult<Json<UserNotificationSettings>> {
    if let Some(interval) = input.digest_interval.as_deref() {
        // PostgreSQL casts this string to an interval; validate the small
        // set the UI offers rather than arbitrary interval syntax.
        const VALID_INTERVALS: &[&str] = &["1h", "6h", "12h", "24h", "7d"];
        if !VALID_INTERVALS.contains(&interval) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Digest interval must be one of: {}",
                VALID_INTERVALS.join(", ")
            ))));
        }
    }

    let settings =
        NotificationPreferenceRepo::upsert_settings(&state.pool, user.user_id, &input).await?;
    Ok(Json(settings))
}
