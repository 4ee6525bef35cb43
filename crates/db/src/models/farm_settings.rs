//! Per-organization farm settings, including the ear-notch litter counter.

use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `farm_settings` table. One row per organization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FarmSettings {
    pub id: DbId,
    pub organization_id: DbId,
    /// Next litter number to stamp on a farrowing's right-ear notches.
    pub next_litter_number: i32,
    pub default_weaning_age_days: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating farm settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFarmSettings {
    pub default_weaning_age_days: Option<i32>,
}
