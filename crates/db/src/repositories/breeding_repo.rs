//! Repository for the `breeding_attempts` table.

use chrono::NaiveDate;
use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::breeding::{BreedingAttempt, CreateBreedingAttempt};

const COLUMNS: &str = "id, organization_id, sow_id, boar_id, boar_description, method, bred_at, \
     outcome, pregnancy_confirmed_at, notes, created_at, updated_at";

/// Provides CRUD operations for breeding attempts.
pub struct BreedingRepo;

impl BreedingRepo {
    /// Insert a new breeding attempt with a `pending` outcome.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        sow_id: DbId,
        input: &CreateBreedingAttempt,
    ) -> Result<BreedingAttempt, sqlx::Error> {
        let query = format!(
            "INSERT INTO breeding_attempts
                (organization_id, sow_id, boar_id, boar_description, method, bred_at, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BreedingAttempt>(&query)
            .bind(organization_id)
            .bind(sow_id)
            .bind(input.boar_id)
            .bind(&input.boar_description)
            .bind(&input.method)
            .bind(input.bred_at)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an attempt by ID within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<BreedingAttempt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM breeding_attempts WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, BreedingAttempt>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List attempts for a sow, newest first.
    pub async fn list_by_sow(
        pool: &PgPool,
        organization_id: DbId,
        sow_id: DbId,
    ) -> Result<Vec<BreedingAttempt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM breeding_attempts
             WHERE sow_id = $1 AND organization_id = $2
             ORDER BY bred_at DESC, id DESC"
        );
        sqlx::query_as::<_, BreedingAttempt>(&query)
            .bind(sow_id)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Attempts still pending a pregnancy check, oldest first.
    pub async fn list_pending_checks(
        pool: &PgPool,
        organization_id: DbId,
        bred_on_or_before: NaiveDate,
    ) -> Result<Vec<BreedingAttempt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM breeding_attempts
             WHERE organization_id = $1 AND outcome = 'pending' AND bred_at <= $2
             ORDER BY bred_at ASC, id ASC"
        );
        sqlx::query_as::<_, BreedingAttempt>(&query)
            .bind(organization_id)
            .bind(bred_on_or_before)
            .fetch_all(pool)
            .await
    }

    /// Record a pregnancy-check outcome.
    ///
    /// A `pregnant` outcome stamps `pregnancy_confirmed_at`; flipping back
    /// to `pending` clears it.
    pub async fn update_outcome(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        outcome: &str,
        notes: Option<&str>,
    ) -> Result<Option<BreedingAttempt>, sqlx::Error> {
        let query = format!(
            "UPDATE breeding_attempts SET
                outcome = $3,
                pregnancy_confirmed_at = CASE
                    WHEN $3 = 'pregnant' THEN NOW()
                    WHEN $3 = 'pending' THEN NULL
                    ELSE pregnancy_confirmed_at
                END,
                notes = COALESCE($4, notes),
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BreedingAttempt>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(outcome)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete an attempt.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM breeding_attempts WHERE id = $1 AND organization_id = $2")
                .bind(id)
                .bind(organization_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
