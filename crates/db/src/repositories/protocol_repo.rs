//! Repository for the `protocols` and `protocol_tasks` tables.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::protocol::{
    CreateProtocol, CreateProtocolTask, Protocol, ProtocolTask, UpdateProtocol, UpdateProtocolTask,
};

const COLUMNS: &str =
    "id, organization_id, name, trigger_event, description, is_active, created_at, updated_at";

const TASK_COLUMNS: &str =
    "id, protocol_id, title, description, days_offset, sort_order, created_at";

/// Provides CRUD operations for protocols and their task templates.
pub struct ProtocolRepo;

impl ProtocolRepo {
    /// Insert a new protocol, returning the created row.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateProtocol,
    ) -> Result<Protocol, sqlx::Error> {
        let query = format!(
            "INSERT INTO protocols (organization_id, name, trigger_event, description, is_active)
             VALUES ($1, $2, $3, $4, COALESCE($5, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Protocol>(&query)
            .bind(organization_id)
            .bind(&input.name)
            .bind(&input.trigger_event)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a protocol by ID within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Protocol>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM protocols WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, Protocol>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List all protocols for an organization.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<Protocol>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM protocols WHERE organization_id = $1 ORDER BY name ASC"
        );
        sqlx::query_as::<_, Protocol>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Active protocols for a trigger event (expansion path).
    pub async fn list_active_by_trigger(
        pool: &PgPool,
        organization_id: DbId,
        trigger_event: &str,
    ) -> Result<Vec<Protocol>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM protocols
             WHERE organization_id = $1 AND trigger_event = $2 AND is_active = TRUE
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Protocol>(&query)
            .bind(organization_id)
            .bind(trigger_event)
            .fetch_all(pool)
            .await
    }

    /// Update a protocol. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdateProtocol,
    ) -> Result<Option<Protocol>, sqlx::Error> {
        let query = format!(
            "UPDATE protocols SET
                name = COALESCE($3, name),
                trigger_event = COALESCE($4, trigger_event),
                description = COALESCE($5, description),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Protocol>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(&input.name)
            .bind(&input.trigger_event)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a protocol. The caller must first check
    /// [`Self::has_outstanding_tasks`]; task templates cascade.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM protocols WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `true` if any scheduled task expanded from this protocol is still
    /// incomplete. Such protocols cannot be deleted.
    pub async fn has_outstanding_tasks(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM scheduled_tasks st
                JOIN protocol_tasks pt ON st.protocol_task_id = pt.id
                WHERE pt.protocol_id = $1 AND st.completed_at IS NULL
            )",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    // -- Task templates --

    /// Insert a task template under a protocol.
    pub async fn create_task(
        pool: &PgPool,
        protocol_id: DbId,
        input: &CreateProtocolTask,
    ) -> Result<ProtocolTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO protocol_tasks (protocol_id, title, description, days_offset, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0))
             RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, ProtocolTask>(&query)
            .bind(protocol_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.days_offset)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// List task templates of a protocol in display order.
    pub async fn list_tasks(
        pool: &PgPool,
        protocol_id: DbId,
    ) -> Result<Vec<ProtocolTask>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM protocol_tasks
             WHERE protocol_id = $1
             ORDER BY sort_order ASC, days_offset ASC, id ASC"
        );
        sqlx::query_as::<_, ProtocolTask>(&query)
            .bind(protocol_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task template. Only non-`None` fields are applied.
    pub async fn update_task(
        pool: &PgPool,
        protocol_id: DbId,
        task_id: DbId,
        input: &UpdateProtocolTask,
    ) -> Result<Option<ProtocolTask>, sqlx::Error> {
        let query = format!(
            "UPDATE protocol_tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                days_offset = COALESCE($5, days_offset),
                sort_order = COALESCE($6, sort_order)
             WHERE id = $1 AND protocol_id = $2
             RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, ProtocolTask>(&query)
            .bind(task_id)
            .bind(protocol_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.days_offset)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task template.
    pub async fn delete_task(
        pool: &PgPool,
        protocol_id: DbId,
        task_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM protocol_tasks WHERE id = $1 AND protocol_id = $2")
            .bind(task_id)
            .bind(protocol_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
