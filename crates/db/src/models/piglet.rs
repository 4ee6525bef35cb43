//! Piglet model and DTOs.

use farrowtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `piglets` table.
///
/// Identity is the ear-notch pair: right = litter number, left = sequence
/// within the litter.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Piglet {
    pub id: DbId,
    pub organization_id: DbId,
    pub farrowing_id: DbId,
    pub ear_notch_right: i32,
    pub ear_notch_left: i32,
    pub sex: Option<String>,
    pub status: String,
    pub weaning_weight_grams: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a piglet row directly.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePiglet {
    pub ear_notch_right: i32,
    pub ear_notch_left: i32,
    pub sex: Option<String>,
    /// Defaults to `nursing` if omitted.
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a piglet. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePiglet {
    pub sex: Option<String>,
    pub status: Option<String>,
    pub weaning_weight_grams: Option<i32>,
    pub notes: Option<String>,
}
