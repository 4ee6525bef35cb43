//! Handlers for the `/settings` resource (per-farm settings).

use axum::extract::State;
use axum::Json;
use farrowtrack_core::error::CoreError;
use farrowtrack_db::models::farm_settings::{FarmSettings, UpdateFarmSettings};
use farrowtrack_db::repositories::FarmSettingsRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/settings
///
/// Creates the default settings row on first access.
pub async fn get(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<FarmSettings>> {
    let settings = FarmSettingsRepo::get_or_create(&state.pool, user.organization_id).await?;
    Ok(Json(settings))
}

/// PUT /api/v1/settings
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateFarmSettings>,
) -> AppResult<Json<FarmSettings>> {
    if let Some(days) = input.default_weaning_age_days {
        if days <= 0 {
            return Err(AppError::Core(CoreError::Validation(
                "Weaning age must be positive".into(),
            )));
        }
    }

    // Make sure the row exists before the partial update.
    FarmSettingsRepo::get_or_create(&state.pool, user.organization_id).await?;

    let settings = FarmSettingsRepo::update(&state.pool, user.organization_id, &input)
        .await?
        .ok_or_else(|| AppError::InternalError("Farm settings row disappeared".into()))?;
    Ok(Json(settings))
}
