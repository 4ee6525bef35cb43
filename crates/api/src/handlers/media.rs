//! Photo upload handlers.
//!
//! Uploaded photos land under the media root as
//! `{org}/{entity}/{id}-{uuid}.{ext}` and are served statically from
//! `/media`. The animal row's `photo_url` is updated to the public path.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use farrowtrack_core::types::DbId;
use farrowtrack_db::models::boar::Boar;
use farrowtrack_db::models::sow::Sow;
use farrowtrack_db::repositories::{BoarRepo, SowRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Photo extensions accepted for upload.
const PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// POST /api/v1/sows/{id}/photo
pub async fn upload_sow_photo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Sow>> {
    SowRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Sow", id))?;

    let photo_url = store_photo(&state, user.organization_id, "sows", id, multipart).await?;

    let sow = SowRepo::update_photo_url(&state.pool, user.organization_id, id, &photo_url)
        .await?
        .ok_or(AppError::not_found("Sow", id))?;
    Ok(Json(sow))
}

/// POST /api/v1/boars/{id}/photo
pub async fn upload_boar_photo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Boar>> {
    BoarRepo::find_by_id(&state.pool, user.organization_id, id)
        .await?
        .ok_or(AppError::not_found("Boar", id))?;

    let photo_url = store_photo(&state, user.organization_id, "boars", id, multipart).await?;

    let boar = BoarRepo::update_photo_url(&state.pool, user.organization_id, id, &photo_url)
        .await?
        .ok_or(AppError::not_found("Boar", id))?;
    Ok(Json(boar))
}

/// Read the first file field, validate its extension, and write it under
/// the media root. Returns the public `/media/...` path.
async fn store_photo(
    state: &AppState,
    organization_id: DbId,
    entity: &str,
    id: DbId,
    mut multipart: Multipart,
) -> AppResult<String> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .ok_or_else(|| AppError::BadRequest("No file in multipart upload".to_string()))?;

    let file_name = field
        .file_name()
        .unwrap_or("photo")
        .to_string();
    let extension = file_name
        .rsplit('.')
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !PHOTO_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported photo type '.{extension}'. Accepted: png, jpg, jpeg, webp"
        )));
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded photo is empty".to_string()));
    }

    let relative = format!(
        "{organization_id}/{entity}/{id}-{}.{extension}",
        uuid::Uuid::new_v4()
    );
    let dest = state.config.media_root.join(&relative);
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create media dir: {e}")))?;
    }
    tokio::fs::write(&dest, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store photo: {e}")))?;

    Ok(format!("/media/{relative}"))
}
