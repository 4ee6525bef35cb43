//! Farrowing cycle model and DTOs.

use chrono::NaiveDate;
use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `farrowings` table: one gestation-to-weaning cycle.
///
/// Created at breeding time with only `expected_date` populated; the
/// remaining fields are stamped as the cycle progresses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Farrowing {
    pub id: DbId,
    pub organization_id: DbId,
    pub sow_id: DbId,
    pub breeding_attempt_id: Option<DbId>,
    pub expected_date: NaiveDate,
    pub actual_date: Option<NaiveDate>,
    pub live_born: Option<i32>,
    pub stillborn: Option<i32>,
    pub mummified: Option<i32>,
    /// Right-ear notch value for the litter, allocated when the farrowing
    /// outcome is recorded.
    pub litter_number: Option<i32>,
    pub weaned_count: Option<i32>,
    pub weaning_date: Option<NaiveDate>,
    pub moved_out_of_farrowing_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a farrowing outcome (actual date + litter counts).
#[derive(Debug, Clone, Deserialize)]
pub struct RecordFarrowing {
    pub actual_date: NaiveDate,
    pub live_born: i32,
    pub stillborn: Option<i32>,
    pub mummified: Option<i32>,
    pub notes: Option<String>,
}

/// DTO for the weaning workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct WeanLitter {
    pub weaning_date: NaiveDate,
    /// Overrides the nursing-piglet reconciliation target when fewer
    /// piglets survived to weaning than were born alive.
    pub weaned_count: Option<i32>,
}
