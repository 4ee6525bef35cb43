//! Repository for the `farrowings` table.

use chrono::NaiveDate;
use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::farrowing::{Farrowing, RecordFarrowing};
use crate::repositories::FarmSettingsRepo;

const COLUMNS: &str = "id, organization_id, sow_id, breeding_attempt_id, expected_date, \
     actual_date, live_born, stillborn, mummified, litter_number, weaned_count, weaning_date, \
     moved_out_of_farrowing_date, notes, created_at, updated_at";

/// Provides CRUD operations for farrowing cycles.
pub struct FarrowingRepo;

impl FarrowingRepo {
    /// Create the expectation row at breeding time.
    pub async fn create_expected(
        pool: &PgPool,
        organization_id: DbId,
        sow_id: DbId,
        breeding_attempt_id: Option<DbId>,
        expected_date: NaiveDate,
    ) -> Result<Farrowing, sqlx::Error> {
        let query = format!(
            "INSERT INTO farrowings (organization_id, sow_id, breeding_attempt_id, expected_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Farrowing>(&query)
            .bind(organization_id)
            .bind(sow_id)
            .bind(breeding_attempt_id)
            .bind(expected_date)
            .fetch_one(pool)
            .await
    }

    /// Find a farrowing by ID within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Farrowing>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM farrowings WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, Farrowing>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List farrowings for a sow, newest expectation first.
    pub async fn list_by_sow(
        pool: &PgPool,
        organization_id: DbId,
        sow_id: DbId,
    ) -> Result<Vec<Farrowing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM farrowings
             WHERE sow_id = $1 AND organization_id = $2
             ORDER BY expected_date DESC, id DESC"
        );
        sqlx::query_as::<_, Farrowing>(&query)
            .bind(sow_id)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// List farrowings for an organization whose expected date falls in
    /// the given window and that have not farrowed yet (due board).
    pub async fn list_due_between(
        pool: &PgPool,
        organization_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Farrowing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM farrowings
             WHERE organization_id = $1 AND actual_date IS NULL
               AND expected_date BETWEEN $2 AND $3
             ORDER BY expected_date ASC, id ASC"
        );
        sqlx::query_as::<_, Farrowing>(&query)
            .bind(organization_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// The still-open expectation row created by a breeding attempt.
    pub async fn find_open_by_attempt(
        pool: &PgPool,
        organization_id: DbId,
        breeding_attempt_id: DbId,
    ) -> Result<Option<Farrowing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM farrowings
             WHERE breeding_attempt_id = $1 AND organization_id = $2 AND actual_date IS NULL"
        );
        sqlx::query_as::<_, Farrowing>(&query)
            .bind(breeding_attempt_id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Record the farrowing outcome: actual date, litter counts, and a
    /// freshly allocated litter number.
    ///
    /// The counter bump and the farrowing update are one logical write, so
    /// they run inside a transaction; a failure rolls the counter back.
    pub async fn record_outcome(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &RecordFarrowing,
    ) -> Result<Option<Farrowing>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        FarmSettingsRepo::get_or_create(pool, organization_id).await?;
        let litter_number: i32 = sqlx::query_scalar(
            "UPDATE farm_settings SET next_litter_number = next_litter_number + 1, updated_at = NOW()
             WHERE organization_id = $1
             RETURNING next_litter_number - 1",
        )
        .bind(organization_id)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE farrowings SET
                actual_date = $3,
                live_born = $4,
                stillborn = COALESCE($5, stillborn, 0),
                mummified = COALESCE($6, mummified, 0),
                litter_number = $7,
                notes = COALESCE($8, notes),
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2 AND actual_date IS NULL
             RETURNING {COLUMNS}"
        );
        let farrowing = sqlx::query_as::<_, Farrowing>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(input.actual_date)
            .bind(input.live_born)
            .bind(input.stillborn)
            .bind(input.mummified)
            .bind(litter_number)
            .bind(&input.notes)
            .fetch_optional(&mut *tx)
            .await?;

        match farrowing {
            Some(f) => {
                tx.commit().await?;
                Ok(Some(f))
            }
            // Already farrowed or not found: do not burn a litter number.
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Stamp the weaning fields set by the weaning workflow.
    pub async fn record_weaning(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        weaning_date: NaiveDate,
        weaned_count: i32,
    ) -> Result<Option<Farrowing>, sqlx::Error> {
        let query = format!(
            "UPDATE farrowings SET
                weaning_date = $3,
                weaned_count = $4,
                moved_out_of_farrowing_date = $3,
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Farrowing>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(weaning_date)
            .bind(weaned_count)
            .fetch_optional(pool)
            .await
    }

    /// Delete an open (never-farrowed) expectation row. Used when a
    /// pregnancy check comes back negative.
    pub async fn delete_open(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM farrowings
             WHERE id = $1 AND organization_id = $2 AND actual_date IS NULL",
        )
        .bind(id)
        .bind(organization_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Completed farrowing count for a sow (parity classification).
    pub async fn count_completed_by_sow(
        pool: &PgPool,
        organization_id: DbId,
        sow_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM farrowings
             WHERE sow_id = $1 AND organization_id = $2 AND actual_date IS NOT NULL",
        )
        .bind(sow_id)
        .bind(organization_id)
        .fetch_one(pool)
        .await
    }
}
