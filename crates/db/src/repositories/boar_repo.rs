//! Repository for the `boars` table.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::boar::{Boar, CreateBoar, UpdateBoar};

const COLUMNS: &str = "id, organization_id, ear_tag, name, breed, birth_date, status, sire_name, \
     dam_name, registration_number, notes, photo_url, created_at, updated_at";

/// Provides CRUD operations for boars.
pub struct BoarRepo;

impl BoarRepo {
    /// Insert a new boar, returning the created row.
    ///
    /// If `status` is `None`, defaults to `active`.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateBoar,
    ) -> Result<Boar, sqlx::Error> {
        let query = format!(
            "INSERT INTO boars (organization_id, ear_tag, name, breed, birth_date, status,
                                sire_name, dam_name, registration_number, notes)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'active'), $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Boar>(&query)
            .bind(organization_id)
            .bind(&input.ear_tag)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(input.birth_date)
            .bind(&input.status)
            .bind(&input.sire_name)
            .bind(&input.dam_name)
            .bind(&input.registration_number)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a boar by ID within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Boar>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boars WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, Boar>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List boars for an organization, optionally filtered by status.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Boar>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM boars
             WHERE organization_id = $1 AND ($2::text IS NULL OR status = $2)
             ORDER BY ear_tag NULLS LAST, name NULLS LAST, id"
        );
        sqlx::query_as::<_, Boar>(&query)
            .bind(organization_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a boar. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdateBoar,
    ) -> Result<Option<Boar>, sqlx::Error> {
        let query = format!(
            "UPDATE boars SET
                ear_tag = COALESCE($3, ear_tag),
                name = COALESCE($4, name),
                breed = COALESCE($5, breed),
                birth_date = COALESCE($6, birth_date),
                status = COALESCE($7, status),
                sire_name = COALESCE($8, sire_name),
                dam_name = COALESCE($9, dam_name),
                registration_number = COALESCE($10, registration_number),
                notes = COALESCE($11, notes),
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Boar>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(&input.ear_tag)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(input.birth_date)
            .bind(&input.status)
            .bind(&input.sire_name)
            .bind(&input.dam_name)
            .bind(&input.registration_number)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a boar. Breeding attempts that referenced it keep their row
    /// with `boar_id` set NULL.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boars WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stamp a freshly uploaded photo URL.
    pub async fn update_photo_url(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        photo_url: &str,
    ) -> Result<Option<Boar>, sqlx::Error> {
        let query = format!(
            "UPDATE boars SET photo_url = $3, updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Boar>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(photo_url)
            .fetch_optional(pool)
            .await
    }
}
