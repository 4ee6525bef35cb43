//! Sow entity model and DTOs.

use chrono::NaiveDate;
use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sow {
    pub id: DbId,
    pub organization_id: DbId,
    /// Unique per organization when present.
    pub ear_tag: Option<String>,
    pub name: Option<String>,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub status: String,
    pub sire_name: Option<String>,
    pub dam_name: Option<String>,
    pub right_ear_notch: Option<i32>,
    pub left_ear_notch: Option<i32>,
    pub registration_number: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub housing_unit_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a sow.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSow {
    pub ear_tag: Option<String>,
    pub name: Option<String>,
    pub breed: String,
    pub birth_date: NaiveDate,
    /// Defaults to `active` if omitted.
    pub status: Option<String>,
    pub sire_name: Option<String>,
    pub dam_name: Option<String>,
    pub right_ear_notch: Option<i32>,
    pub left_ear_notch: Option<i32>,
    pub registration_number: Option<String>,
    pub notes: Option<String>,
    pub housing_unit_id: Option<DbId>,
}

/// DTO for updating a sow. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSow {
    pub ear_tag: Option<String>,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub sire_name: Option<String>,
    pub dam_name: Option<String>,
    pub right_ear_notch: Option<i32>,
    pub left_ear_notch: Option<i32>,
    pub registration_number: Option<String>,
    pub notes: Option<String>,
}
