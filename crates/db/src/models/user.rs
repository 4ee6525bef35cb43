//! User and role models.

use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role primary keys are SMALLSERIAL.
pub type RoleId = i16;

/// A row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

/// A row from the `users` table.
///
/// `password_hash` is intentionally not serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub organization_id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role_id: RoleId,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user. The caller hashes the password first.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub organization_id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: RoleId,
}

/// DTO for updating a user. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub role_id: Option<RoleId>,
    pub is_active: Option<bool>,
}
