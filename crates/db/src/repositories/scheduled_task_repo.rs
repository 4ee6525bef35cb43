//! Repository for the `scheduled_tasks` table.

use chrono::NaiveDate;
use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::scheduled_task::{CreateScheduledTask, ScheduledTask};

const COLUMNS: &str = "id, organization_id, protocol_task_id, sow_id, title, description, \
     due_date, completed_at, reminded_at, created_at, updated_at";

/// Provides CRUD operations for scheduled tasks plus reminder helpers.
pub struct ScheduledTaskRepo;

impl ScheduledTaskRepo {
    /// Insert a manually created task.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateScheduledTask,
    ) -> Result<ScheduledTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO scheduled_tasks (organization_id, sow_id, title, description, due_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScheduledTask>(&query)
            .bind(organization_id)
            .bind(input.sow_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Insert a task expanded from a protocol task template.
    pub async fn create_from_protocol(
        pool: &PgPool,
        organization_id: DbId,
        protocol_task_id: DbId,
        sow_id: Option<DbId>,
        title: &str,
        description: Option<&str>,
        due_date: NaiveDate,
    ) -> Result<ScheduledTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO scheduled_tasks
                (organization_id, protocol_task_id, sow_id, title, description, due_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScheduledTask>(&query)
            .bind(organization_id)
            .bind(protocol_task_id)
            .bind(sow_id)
            .bind(title)
            .bind(description)
            .bind(due_date)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<ScheduledTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scheduled_tasks WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, ScheduledTask>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks for an organization.
    ///
    /// `due_before` bounds the due date; `include_completed` keeps
    /// finished tasks in the listing.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
        due_before: Option<NaiveDate>,
        include_completed: bool,
    ) -> Result<Vec<ScheduledTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scheduled_tasks
             WHERE organization_id = $1
               AND ($2::date IS NULL OR due_date <= $2)
               AND ($3 OR completed_at IS NULL)
             ORDER BY due_date ASC, id ASC"
        );
        sqlx::query_as::<_, ScheduledTask>(&query)
            .bind(organization_id)
            .bind(due_before)
            .bind(include_completed)
            .fetch_all(pool)
            .await
    }

    /// Mark a task complete. Returns `None` for unknown or already
    /// completed tasks.
    pub async fn complete(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<ScheduledTask>, sqlx::Error> {
        let query = format!(
            "UPDATE scheduled_tasks SET completed_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND organization_id = $2 AND completed_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScheduledTask>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM scheduled_tasks WHERE id = $1 AND organization_id = $2")
                .bind(id)
                .bind(organization_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Tasks at or past their due date that nobody has been reminded
    /// about. Scanned by the reminder service across all organizations.
    pub async fn list_due_unreminded(
        pool: &PgPool,
        due_on_or_before: NaiveDate,
    ) -> Result<Vec<ScheduledTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scheduled_tasks
             WHERE due_date <= $1 AND completed_at IS NULL AND reminded_at IS NULL
             ORDER BY organization_id, due_date ASC, id ASC"
        );
        sqlx::query_as::<_, ScheduledTask>(&query)
            .bind(due_on_or_before)
            .fetch_all(pool)
            .await
    }

    /// Stamp `reminded_at` after the reminder event is published.
    pub async fn mark_reminded(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE scheduled_tasks SET reminded_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
