//! Notification entity models and DTOs.

use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub event_id: DbId,
    pub user_id: DbId,
    pub channel: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub is_delivered: bool,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A row from the `notification_preferences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationPreference {
    pub id: DbId,
    pub user_id: DbId,
    pub event_type_id: DbId,
    pub is_enabled: bool,
    pub channels: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `user_notification_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserNotificationSettings {
    pub id: DbId,
    pub user_id: DbId,
    pub dnd_enabled: bool,
    pub dnd_until: Option<Timestamp>,
    pub digest_enabled: bool,
    pub digest_interval: String,
    pub digest_last_sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a notification preference.
#[derive(Debug, Deserialize)]
pub struct UpsertPreference {
    pub event_type_id: DbId,
    pub is_enabled: bool,
    pub channels: Option<serde_json::Value>,
}

/// DTO for updating user notification settings (DND, digest).
#[derive(Debug, Deserialize)]
pub struct UpdateNotificationSettings {
    pub dnd_enabled: Option<bool>,
    pub dnd_until: Option<Timestamp>,
    pub digest_enabled: Option<bool>,
    pub digest_interval: Option<String>,
}
