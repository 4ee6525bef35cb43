//! Route definitions for the herd: sows and boars.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{boar, breeding, farrowing, import, media, sow};
use crate::state::AppState;

/// Routes mounted at `/sows` and `/boars`.
///
/// ```text
/// GET    /sows                       -> list (?status=)
/// POST   /sows                       -> create
/// GET    /sows/export                -> CSV download
/// POST   /sows/import                -> spreadsheet import (multipart)
/// GET    /sows/{id}                  -> get_by_id
/// PUT    /sows/{id}                  -> update
/// DELETE /sows/{id}                  -> delete (cascades)
/// POST   /sows/{id}/photo            -> photo upload (multipart)
/// POST   /sows/{id}/transfer         -> housing transfer
/// GET    /sows/{sow_id}/breedings    -> breeding history
/// POST   /sows/{sow_id}/breedings    -> breeding recorder workflow
/// GET    /sows/{sow_id}/farrowings   -> farrowing history
///
/// GET    /boars                      -> list (?status=)
/// POST   /boars                      -> create
/// GET    /boars/{id}                 -> get_by_id
/// PUT    /boars/{id}                 -> update
/// DELETE /boars/{id}                 -> delete
/// POST   /boars/{id}/photo           -> photo upload (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sows", get(sow::list).post(sow::create))
        .route("/sows/export", get(sow::export))
        .route("/sows/import", post(import::import_sows))
        .route(
            "/sows/{id}",
            get(sow::get_by_id).put(sow::update).delete(sow::delete),
        )
        .route("/sows/{id}/photo", post(media::upload_sow_photo))
        .route("/sows/{id}/transfer", post(sow::transfer))
        .route(
            "/sows/{sow_id}/breedings",
            get(breeding::list_by_sow).post(breeding::record),
        )
        .route("/sows/{sow_id}/farrowings", get(farrowing::list_by_sow))
        .route("/boars", get(boar::list).post(boar::create))
        .route(
            "/boars/{id}",
            get(boar::get_by_id).put(boar::update).delete(boar::delete),
        )
        .route("/boars/{id}/photo", post(media::upload_boar_photo))
}
