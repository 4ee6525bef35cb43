//! Repository for the `piglets` table.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::piglet::{CreatePiglet, Piglet, UpdatePiglet};

const COLUMNS: &str = "id, organization_id, farrowing_id, ear_notch_right, ear_notch_left, sex, \
     status, weaning_weight_grams, notes, created_at, updated_at";

/// Provides CRUD operations for piglets plus weaning reconciliation helpers.
pub struct PigletRepo;

impl PigletRepo {
    /// Insert a new piglet, returning the created row.
    ///
    /// If `status` is `None`, defaults to `nursing`.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        farrowing_id: DbId,
        input: &CreatePiglet,
    ) -> Result<Piglet, sqlx::Error> {
        let query = format!(
            "INSERT INTO piglets
                (organization_id, farrowing_id, ear_notch_right, ear_notch_left, sex, status, notes)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'nursing'), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Piglet>(&query)
            .bind(organization_id)
            .bind(farrowing_id)
            .bind(input.ear_notch_right)
            .bind(input.ear_notch_left)
            .bind(&input.sex)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a piglet by ID within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Piglet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM piglets WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, Piglet>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List piglets of a farrowing, ordered by left-ear sequence.
    pub async fn list_by_farrowing(
        pool: &PgPool,
        organization_id: DbId,
        farrowing_id: DbId,
    ) -> Result<Vec<Piglet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM piglets
             WHERE farrowing_id = $1 AND organization_id = $2
             ORDER BY ear_notch_left ASC, id ASC"
        );
        sqlx::query_as::<_, Piglet>(&query)
            .bind(farrowing_id)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Update a piglet. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdatePiglet,
    ) -> Result<Option<Piglet>, sqlx::Error> {
        let query = format!(
            "UPDATE piglets SET
                sex = COALESCE($3, sex),
                status = COALESCE($4, status),
                weaning_weight_grams = COALESCE($5, weaning_weight_grams),
                notes = COALESCE($6, notes),
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Piglet>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(&input.sex)
            .bind(&input.status)
            .bind(input.weaning_weight_grams)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a piglet.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM piglets WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count piglets of a farrowing in a given status.
    pub async fn count_by_status(
        pool: &PgPool,
        organization_id: DbId,
        farrowing_id: DbId,
        status: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM piglets
             WHERE farrowing_id = $1 AND organization_id = $2 AND status = $3",
        )
        .bind(farrowing_id)
        .bind(organization_id)
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// Highest left-ear sequence already assigned within a farrowing.
    pub async fn max_sequence(
        pool: &PgPool,
        organization_id: DbId,
        farrowing_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(MAX(ear_notch_left), 0) FROM piglets
             WHERE farrowing_id = $1 AND organization_id = $2",
        )
        .bind(farrowing_id)
        .bind(organization_id)
        .fetch_one(pool)
        .await
    }

    /// Move every nursing piglet of a farrowing to `weaned`. Returns the
    /// number of rows updated.
    pub async fn wean_nursing(
        pool: &PgPool,
        organization_id: DbId,
        farrowing_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE piglets SET status = 'weaned', updated_at = NOW()
             WHERE farrowing_id = $1 AND organization_id = $2 AND status = 'nursing'",
        )
        .bind(farrowing_id)
        .bind(organization_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
