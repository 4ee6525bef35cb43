//! Repository for the `matrix_treatments` table.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::matrix::{CreateMatrixTreatment, MatrixTreatment, UpdateMatrixTreatment};

const COLUMNS: &str = "id, organization_id, sow_id, batch_name, start_date, last_dose_date, \
     expected_heat_date, actual_heat_date, bred, notes, created_at, updated_at";

/// Provides CRUD operations for Matrix synchronization treatments.
pub struct MatrixRepo;

impl MatrixRepo {
    /// Insert a new treatment, returning the created row.
    ///
    /// `expected_heat_date` must already be resolved by the caller (the
    /// handler defaults it from the last dose date).
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateMatrixTreatment,
        expected_heat_date: chrono::NaiveDate,
    ) -> Result<MatrixTreatment, sqlx::Error> {
        let query = format!(
            "INSERT INTO matrix_treatments
                (organization_id, sow_id, batch_name, start_date, last_dose_date,
                 expected_heat_date, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MatrixTreatment>(&query)
            .bind(organization_id)
            .bind(input.sow_id)
            .bind(&input.batch_name)
            .bind(input.start_date)
            .bind(input.last_dose_date)
            .bind(expected_heat_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a treatment by ID within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<MatrixTreatment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM matrix_treatments WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, MatrixTreatment>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List all treatments for an organization, grouped by batch in the
    /// result ordering (batch name, then expected heat date).
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<MatrixTreatment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM matrix_treatments
             WHERE organization_id = $1
             ORDER BY batch_name ASC, expected_heat_date ASC, id ASC"
        );
        sqlx::query_as::<_, MatrixTreatment>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Update a treatment. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdateMatrixTreatment,
    ) -> Result<Option<MatrixTreatment>, sqlx::Error> {
        let query = format!(
            "UPDATE matrix_treatments SET
                batch_name = COALESCE($3, batch_name),
                last_dose_date = COALESCE($4, last_dose_date),
                expected_heat_date = COALESCE($5, expected_heat_date),
                actual_heat_date = COALESCE($6, actual_heat_date),
                notes = COALESCE($7, notes),
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MatrixTreatment>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(&input.batch_name)
            .bind(input.last_dose_date)
            .bind(input.expected_heat_date)
            .bind(input.actual_heat_date)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Set the `bred` flag after the mark-as-bred workflow records the
    /// breeding attempt.
    pub async fn mark_bred(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        actual_heat_date: Option<chrono::NaiveDate>,
    ) -> Result<Option<MatrixTreatment>, sqlx::Error> {
        let query = format!(
            "UPDATE matrix_treatments SET
                bred = TRUE,
                actual_heat_date = COALESCE($3, actual_heat_date),
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MatrixTreatment>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(actual_heat_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a treatment.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM matrix_treatments WHERE id = $1 AND organization_id = $2")
                .bind(id)
                .bind(organization_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
