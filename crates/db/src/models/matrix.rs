//! Matrix synchronization treatment model and DTOs.

use chrono::NaiveDate;
use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `matrix_treatments` table: one sow's course within a
/// named synchronization batch.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MatrixTreatment {
    pub id: DbId,
    pub organization_id: DbId,
    pub sow_id: DbId,
    pub batch_name: String,
    pub start_date: NaiveDate,
    pub last_dose_date: NaiveDate,
    pub expected_heat_date: NaiveDate,
    pub actual_heat_date: Option<NaiveDate>,
    pub bred: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a treatment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMatrixTreatment {
    pub sow_id: DbId,
    pub batch_name: String,
    pub start_date: NaiveDate,
    pub last_dose_date: NaiveDate,
    /// Defaults to last dose + 5 days when omitted.
    pub expected_heat_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for updating a treatment. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMatrixTreatment {
    pub batch_name: Option<String>,
    pub last_dose_date: Option<NaiveDate>,
    pub expected_heat_date: Option<NaiveDate>,
    pub actual_heat_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
