//! Housing unit model and DTOs.

use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `housing_units` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HousingUnit {
    pub id: DbId,
    pub organization_id: DbId,
    pub name: String,
    pub unit_type: String,
    pub capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a housing unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHousingUnit {
    pub name: String,
    /// `gestation`, `farrowing`, `nursery`, `finishing`, or `boar_pen`.
    pub unit_type: String,
    pub capacity: i32,
}

/// DTO for updating a housing unit. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHousingUnit {
    pub name: Option<String>,
    pub unit_type: Option<String>,
    pub capacity: Option<i32>,
}
