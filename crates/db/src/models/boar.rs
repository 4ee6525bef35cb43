//! Boar entity model and DTOs.

use chrono::NaiveDate;
use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `boars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Boar {
    pub id: DbId,
    pub organization_id: DbId,
    pub ear_tag: Option<String>,
    pub name: Option<String>,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub status: String,
    pub sire_name: Option<String>,
    pub dam_name: Option<String>,
    pub registration_number: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a boar.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoar {
    pub ear_tag: Option<String>,
    pub name: Option<String>,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub status: Option<String>,
    pub sire_name: Option<String>,
    pub dam_name: Option<String>,
    pub registration_number: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a boar. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBoar {
    pub ear_tag: Option<String>,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub sire_name: Option<String>,
    pub dam_name: Option<String>,
    pub registration_number: Option<String>,
    pub notes: Option<String>,
}
