//! Scheduled task model and DTOs.

use chrono::NaiveDate;
use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `scheduled_tasks` table: a concrete dated task, either
/// expanded from a protocol or created by hand.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduledTask {
    pub id: DbId,
    pub organization_id: DbId,
    pub protocol_task_id: Option<DbId>,
    pub sow_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub completed_at: Option<Timestamp>,
    pub reminded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a scheduled task by hand.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduledTask {
    pub sow_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
}
