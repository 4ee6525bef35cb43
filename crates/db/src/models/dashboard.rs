//! Read-model rows backing the list screens and the dashboard.
//!
//! These map the `sow_overview` and `housing_occupancy` SQL views, which
//! flatten the joins the client would otherwise issue as N+1 queries.

use chrono::NaiveDate;
use farrowtrack_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sow_overview` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SowOverview {
    pub sow_id: DbId,
    pub organization_id: DbId,
    pub ear_tag: Option<String>,
    pub name: Option<String>,
    pub breed: String,
    pub status: String,
    pub housing_unit_id: Option<DbId>,
    pub farrowing_count: i64,
    /// `gilt` or `sow`.
    pub parity: String,
    pub latest_bred_at: Option<NaiveDate>,
    pub latest_outcome: Option<String>,
    pub needs_pregnancy_check: bool,
    pub next_expected_farrowing: Option<NaiveDate>,
}

/// A row from the `housing_occupancy` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HousingOccupancy {
    pub housing_unit_id: DbId,
    pub organization_id: DbId,
    pub name: String,
    pub unit_type: String,
    pub capacity: i32,
    pub occupants: i64,
}

/// Aggregate herd statistics for the dashboard header.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HerdStats {
    pub active_sows: i64,
    pub gilts: i64,
    pub active_boars: i64,
    pub pending_pregnancy_checks: i64,
    pub farrowings_due_next_week: i64,
    pub open_tasks: i64,
}
