//! Repository for the `events` and `event_types` tables.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{EventRow, EventType};

const EVENT_COLUMNS: &str = "id, event_type_id, source_entity_type, source_entity_id, \
     actor_user_id, payload, created_at";

/// Provides event persistence and event-type lookups.
pub struct EventRepo;

impl EventRepo {
    /// Persist an event. Returns `None` if the event type is unknown
    /// (unknown types are logged and dropped by the persistence service).
    pub async fn insert(
        pool: &PgPool,
        event_type_name: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        actor_user_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<Option<EventRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                (event_type_id, source_entity_type, source_entity_id, actor_user_id, payload)
             SELECT id, $2, $3, $4, $5 FROM event_types WHERE name = $1
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, EventRow>(&query)
            .bind(event_type_name)
            .bind(source_entity_type)
            .bind(source_entity_id)
            .bind(actor_user_id)
            .bind(payload)
            .fetch_optional(pool)
            .await
    }

    /// Look up an event type by name.
    pub async fn get_event_type_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<EventType>, sqlx::Error> {
        sqlx::query_as::<_, EventType>(
            "SELECT id, name, description, is_critical FROM event_types WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// List all event types (preferences screen).
    pub async fn list_event_types(pool: &PgPool) -> Result<Vec<EventType>, sqlx::Error> {
        sqlx::query_as::<_, EventType>(
            "SELECT id, name, description, is_critical FROM event_types ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    /// The most recent persisted event of a given type. The persistence
    /// service writes asynchronously, so callers must tolerate `None`.
    pub async fn latest_event_id_by_type(
        pool: &PgPool,
        event_type_name: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT e.id FROM events e
             JOIN event_types et ON e.event_type_id = et.id
             WHERE et.name = $1
             ORDER BY e.id DESC
             LIMIT 1",
        )
        .bind(event_type_name)
        .fetch_optional(pool)
        .await
    }
}
