//! Repository for the `housing_units` table and the occupancy view.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::HousingOccupancy;
use crate::models::housing::{CreateHousingUnit, HousingUnit, UpdateHousingUnit};

const COLUMNS: &str = "id, organization_id, name, unit_type, capacity, created_at, updated_at";

const OCCUPANCY_COLUMNS: &str =
    "housing_unit_id, organization_id, name, unit_type, capacity, occupants";

/// Provides CRUD operations for housing units.
pub struct HousingRepo;

impl HousingRepo {
    /// Insert a new housing unit, returning the created row.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateHousingUnit,
    ) -> Result<HousingUnit, sqlx::Error> {
        let query = format!(
            "INSERT INTO housing_units (organization_id, name, unit_type, capacity)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HousingUnit>(&query)
            .bind(organization_id)
            .bind(&input.name)
            .bind(&input.unit_type)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    /// Find a housing unit by ID within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<HousingUnit>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM housing_units WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, HousingUnit>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List housing units for an organization, ordered by name.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<HousingUnit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM housing_units WHERE organization_id = $1 ORDER BY name ASC"
        );
        sqlx::query_as::<_, HousingUnit>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Update a housing unit. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdateHousingUnit,
    ) -> Result<Option<HousingUnit>, sqlx::Error> {
        let query = format!(
            "UPDATE housing_units SET
                name = COALESCE($3, name),
                unit_type = COALESCE($4, unit_type),
                capacity = COALESCE($5, capacity),
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HousingUnit>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(&input.name)
            .bind(&input.unit_type)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a housing unit. Resident sows keep their rows with
    /// `housing_unit_id` set NULL.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM housing_units WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Occupancy read model for all units of an organization.
    pub async fn occupancy(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<HousingOccupancy>, sqlx::Error> {
        let query = format!(
            "SELECT {OCCUPANCY_COLUMNS} FROM housing_occupancy
             WHERE organization_id = $1
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, HousingOccupancy>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }
}
