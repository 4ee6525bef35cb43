//! Protocol and protocol-task models and DTOs.

use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `protocols` table: a named task template anchored to a
/// trigger event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Protocol {
    pub id: DbId,
    pub organization_id: DbId,
    pub name: String,
    pub trigger_event: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `protocol_tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProtocolTask {
    pub id: DbId,
    pub protocol_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub days_offset: i32,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a protocol.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProtocol {
    pub name: String,
    /// `breeding`, `farrowing`, or `weaning`.
    pub trigger_event: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for updating a protocol. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProtocol {
    pub name: Option<String>,
    pub trigger_event: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for creating a protocol task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProtocolTask {
    pub title: String,
    pub description: Option<String>,
    pub days_offset: i32,
    pub sort_order: Option<i32>,
}

/// DTO for updating a protocol task. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProtocolTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub days_offset: Option<i32>,
    pub sort_order: Option<i32>,
}
