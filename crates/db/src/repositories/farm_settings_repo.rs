//! Repository for the `farm_settings` table.

use farrowtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::farm_settings::{FarmSettings, UpdateFarmSettings};

const COLUMNS: &str = "id, organization_id, next_litter_number, default_weaning_age_days, \
     created_at, updated_at";

/// Provides farm-settings access, including litter-number allocation.
pub struct FarmSettingsRepo;

impl FarmSettingsRepo {
    /// Fetch the settings row for an organization, creating the default
    /// row on first access.
    pub async fn get_or_create(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<FarmSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO farm_settings (organization_id)
             VALUES ($1)
             ON CONFLICT (organization_id) DO UPDATE SET organization_id = EXCLUDED.organization_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FarmSettings>(&query)
            .bind(organization_id)
            .fetch_one(pool)
            .await
    }

    /// Update settings. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        input: &UpdateFarmSettings,
    ) -> Result<Option<FarmSettings>, sqlx::Error> {
        let query = format!(
            "UPDATE farm_settings SET
                default_weaning_age_days = COALESCE($2, default_weaning_age_days),
                updated_at = NOW()
             WHERE organization_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FarmSettings>(&query)
            .bind(organization_id)
            .bind(input.default_weaning_age_days)
            .fetch_optional(pool)
            .await
    }

    /// Allocate the next litter number for an organization.
    ///
    /// Increments the counter and returns the pre-increment value in one
    /// statement, so concurrent farrowings never share a litter number.
    pub async fn allocate_litter_number(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        // Make sure the row exists before incrementing.
        Self::get_or_create(pool, organization_id).await?;

        sqlx::query_scalar(
            "UPDATE farm_settings SET next_litter_number = next_litter_number + 1, updated_at = NOW()
             WHERE organization_id = $1
             RETURNING next_litter_number - 1",
        )
        .bind(organization_id)
        .fetch_one(pool)
        .await
    }
}
