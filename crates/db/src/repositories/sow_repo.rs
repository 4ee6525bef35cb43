//! Repository for the `sows` table.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::sow::{CreateSow, Sow, UpdateSow};

const COLUMNS: &str = "id, organization_id, ear_tag, name, breed, birth_date, status, sire_name, \
     dam_name, right_ear_notch, left_ear_notch, registration_number, notes, photo_url, \
     housing_unit_id, created_at, updated_at";

/// Provides CRUD operations for sows plus housing and photo helpers.
pub struct SowRepo;

impl SowRepo {
    /// Insert a new sow, returning the created row.
    ///
    /// If `status` is `None`, defaults to `active`.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateSow,
    ) -> Result<Sow, sqlx::Error> {
        let query = format!(
            "INSERT INTO sows (organization_id, ear_tag, name, breed, birth_date, status,
                               sire_name, dam_name, right_ear_notch, left_ear_notch,
                               registration_number, notes, housing_unit_id)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'active'), $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sow>(&query)
            .bind(organization_id)
            .bind(&input.ear_tag)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(input.birth_date)
            .bind(&input.status)
            .bind(&input.sire_name)
            .bind(&input.dam_name)
            .bind(input.right_ear_notch)
            .bind(input.left_ear_notch)
            .bind(&input.registration_number)
            .bind(&input.notes)
            .bind(input.housing_unit_id)
            .fetch_one(pool)
            .await
    }

    /// Find a sow by ID within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Sow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sows WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, Sow>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List sows for an organization, optionally filtered by status,
    /// ordered by ear tag then name.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Sow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sows
             WHERE organization_id = $1 AND ($2::text IS NULL OR status = $2)
             ORDER BY ear_tag NULLS LAST, name NULLS LAST, id"
        );
        sqlx::query_as::<_, Sow>(&query)
            .bind(organization_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a sow. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdateSow,
    ) -> Result<Option<Sow>, sqlx::Error> {
        let query = format!(
            "UPDATE sows SET
                ear_tag = COALESCE($3, ear_tag),
                name = COALESCE($4, name),
                breed = COALESCE($5, breed),
                birth_date = COALESCE($6, birth_date),
                status = COALESCE($7, status),
                sire_name = COALESCE($8, sire_name),
                dam_name = COALESCE($9, dam_name),
                right_ear_notch = COALESCE($10, right_ear_notch),
                left_ear_notch = COALESCE($11, left_ear_notch),
                registration_number = COALESCE($12, registration_number),
                notes = COALESCE($13, notes),
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sow>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(&input.ear_tag)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(input.birth_date)
            .bind(&input.status)
            .bind(&input.sire_name)
            .bind(&input.dam_name)
            .bind(input.right_ear_notch)
            .bind(input.left_ear_notch)
            .bind(&input.registration_number)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a sow. Dependent breeding attempts, farrowings, piglets,
    /// and matrix treatments go with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sows WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All ear tags in use by an organization (import duplicate check).
    pub async fn ear_tags(pool: &PgPool, organization_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT ear_tag FROM sows WHERE organization_id = $1 AND ear_tag IS NOT NULL",
        )
        .bind(organization_id)
        .fetch_all(pool)
        .await
    }

    /// Stamp a freshly uploaded photo URL.
    pub async fn update_photo_url(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        photo_url: &str,
    ) -> Result<Option<Sow>, sqlx::Error> {
        let query = format!(
            "UPDATE sows SET photo_url = $3, updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sow>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(photo_url)
            .fetch_optional(pool)
            .await
    }

    /// Move a sow to a housing unit (or out of housing with `None`).
    pub async fn assign_housing(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        housing_unit_id: Option<DbId>,
    ) -> Result<Option<Sow>, sqlx::Error> {
        let query = format!(
            "UPDATE sows SET housing_unit_id = $3, updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sow>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(housing_unit_id)
            .fetch_optional(pool)
            .await
    }

    /// Count active occupants of a housing unit (capacity check).
    pub async fn count_in_unit(pool: &PgPool, housing_unit_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM sows WHERE housing_unit_id = $1 AND status = 'active'",
        )
        .bind(housing_unit_id)
        .fetch_one(pool)
        .await
    }
}
