//! Handlers for the `/users` resource (organization membership, owner only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use farrowtrack_core::error::CoreError;
use farrowtrack_core::types::DbId;
use farrowtrack_db::models::user::{CreateUser, UpdateUser, User};
use farrowtrack_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    /// `owner`, `manager`, or `worker`.
    pub role: String,
}

/// GET /api/v1/users
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<User>>> {
    user.require_owner()?;
    let users = UserRepo::list_by_organization(&state.pool, user.organization_id).await?;
    Ok(Json(users))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    user.require_owner()?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let role = UserRepo::find_role_by_name(&state.pool, &input.role)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown role '{}'",
                input.role
            )))
        })?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let created = UserRepo::create(
        &state.pool,
        &CreateUser {
            organization_id: user.organization_id,
            username: input.username,
            email: input.email,
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    user.require_owner()?;

    // Membership check before the update touches anything.
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|u| u.organization_id == user.organization_id)
        .ok_or(AppError::not_found("User", id))?;

    let updated = UserRepo::update(&state.pool, target.id, &input)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    Ok(Json(updated))
}
