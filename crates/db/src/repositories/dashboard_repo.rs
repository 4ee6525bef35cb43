//! Read-model queries backing the dashboard and list screens.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::{HerdStats, SowOverview};

const OVERVIEW_COLUMNS: &str = "sow_id, organization_id, ear_tag, name, breed, status, \
     housing_unit_id, farrowing_count, parity, latest_bred_at, latest_outcome, \
     needs_pregnancy_check, next_expected_farrowing";

/// Read-only queries against the SQL views.
pub struct DashboardRepo;

impl DashboardRepo {
    /// The aggregated sow list, optionally filtered by status.
    pub async fn sow_overview(
        pool: &PgPool,
        organization_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<SowOverview>, sqlx::Error> {
        let query = format!(
            "SELECT {OVERVIEW_COLUMNS} FROM sow_overview
             WHERE organization_id = $1 AND ($2::text IS NULL OR status = $2)
             ORDER BY ear_tag NULLS LAST, name NULLS LAST, sow_id"
        );
        sqlx::query_as::<_, SowOverview>(&query)
            .bind(organization_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Aggregate herd counters for the dashboard header.
    pub async fn herd_stats(pool: &PgPool, organization_id: DbId) -> Result<HerdStats, sqlx::Error> {
        sqlx::query_as::<_, HerdStats>(
            "SELECT
                (SELECT COUNT(*) FROM sows
                  WHERE organization_id = $1 AND status = 'active') AS active_sows,
                (SELECT COUNT(*) FROM sow_overview
                  WHERE organization_id = $1 AND status = 'active' AND parity = 'gilt') AS gilts,
                (SELECT COUNT(*) FROM boars
                  WHERE organization_id = $1 AND status = 'active') AS active_boars,
                (SELECT COUNT(*) FROM sow_overview
                  WHERE organization_id = $1 AND needs_pregnancy_check) AS pending_pregnancy_checks,
                (SELECT COUNT(*) FROM farrowings
                  WHERE organization_id = $1 AND actual_date IS NULL
                    AND expected_date BETWEEN CURRENT_DATE AND CURRENT_DATE + 7) AS farrowings_due_next_week,
                (SELECT COUNT(*) FROM scheduled_tasks
                  WHERE organization_id = $1 AND completed_at IS NULL) AS open_tasks",
        )
        .bind(organization_id)
        .fetch_one(pool)
        .await
    }
}
