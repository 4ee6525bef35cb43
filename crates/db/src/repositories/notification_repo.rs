//! Repository for the `notifications` table.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::Notification;

const COLUMNS: &str = "id, event_id, user_id, channel, is_read, read_at, is_delivered, \
     delivered_at, created_at";

/// Provides notification persistence and read/delivery bookkeeping.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification for a user on a channel.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        user_id: DbId,
        channel: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (event_id, user_id, channel)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(event_id)
            .bind(user_id)
            .bind(channel)
            .fetch_one(pool)
            .await
    }

    /// List a user's notifications, newest first, optionally unread only.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_id = $1 AND (NOT $2 OR is_read = FALSE)
             ORDER BY id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(unread_only)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Mark one notification read. Returns `true` if a row changed.
    pub async fn mark_read(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW()
             WHERE id = $1 AND user_id = $2 AND is_read = FALSE",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all of a user's notifications read. Returns the count changed.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW()
             WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Undelivered notifications queued on a channel for a user.
    pub async fn pending_count_for_channel(
        pool: &PgPool,
        user_id: DbId,
        channel: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications
             WHERE user_id = $1 AND channel = $2 AND is_delivered = FALSE",
        )
        .bind(user_id)
        .bind(channel)
        .fetch_one(pool)
        .await
    }

    /// Mark every queued notification on a channel delivered (digest flush).
    pub async fn mark_channel_delivered(
        pool: &PgPool,
        user_id: DbId,
        channel: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_delivered = TRUE, delivered_at = NOW()
             WHERE user_id = $1 AND channel = $2 AND is_delivered = FALSE",
        )
        .bind(user_id)
        .bind(channel)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
