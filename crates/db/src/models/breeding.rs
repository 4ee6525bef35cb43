//! Breeding attempt model and DTOs.

use chrono::NaiveDate;
use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `breeding_attempts` table.
///
/// Either `boar_id` or the free-text `boar_description` identifies the
/// sire; both may be NULL for an unknown service.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BreedingAttempt {
    pub id: DbId,
    pub organization_id: DbId,
    pub sow_id: DbId,
    pub boar_id: Option<DbId>,
    pub boar_description: Option<String>,
    pub method: String,
    pub bred_at: NaiveDate,
    pub outcome: String,
    pub pregnancy_confirmed_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a breeding. `sow_id` comes from the URL path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBreedingAttempt {
    pub boar_id: Option<DbId>,
    pub boar_description: Option<String>,
    /// `natural` or `ai`.
    pub method: String,
    pub bred_at: NaiveDate,
    pub notes: Option<String>,
}

/// DTO for a pregnancy-check update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBreedingOutcome {
    /// `pending`, `pregnant`, or `not_pregnant`.
    pub outcome: String,
    pub notes: Option<String>,
}
