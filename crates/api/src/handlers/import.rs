//! Handler for the spreadsheet sow import.
//!
//! Accepts a multipart CSV/XLSX upload, validates every row against the
//! organization's existing ear tags and the in-file set, inserts valid
//! rows one at a time, and returns the per-row outcome tally. A failed
//! insert counts against the tally and the import continues; already
//! inserted rows stay committed.

use std::collections::HashSet;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use farrowtrack_core::import::{parse_spreadsheet, validate_row, ImportTally, RejectionKind, RowRejection};
use farrowtrack_db::models::sow::CreateSow;
use farrowtrack_db::repositories::SowRepo;
use farrowtrack_events::FarmEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/sows/import
pub async fn import_sows(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ImportTally>)> {
    // Pull the first file field out of the multipart body.
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            upload = Some((file_name, data.to_vec()));
            break;
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file in multipart upload".to_string()))?;

    let rows = parse_spreadsheet(&file_name, &bytes)?;

    // Duplicate detection: the database set plus the in-file set.
    let existing_tags: HashSet<String> = SowRepo::ear_tags(&state.pool, user.organization_id)
        .await?
        .into_iter()
        .collect();
    let mut seen_tags = HashSet::new();

    let mut tally = ImportTally::default();
    for row in &rows {
        let valid = match validate_row(row, &existing_tags, &mut seen_tags) {
            Ok(valid) => valid,
            Err(rejection) => {
                tally.record_rejection(rejection);
                continue;
            }
        };

        let input = CreateSow {
            ear_tag: valid.ear_tag,
            name: valid.name,
            breed: valid.breed,
            birth_date: valid.birth_date,
            status: Some(valid.status.as_str().to_string()),
            sire_name: None,
            dam_name: None,
            right_ear_notch: valid.right_ear_notch,
            left_ear_notch: valid.left_ear_notch,
            registration_number: valid.registration_number,
            notes: valid.notes,
            housing_unit_id: None,
        };

        match SowRepo::create(&state.pool, user.organization_id, &input).await {
            Ok(_) => tally.record_imported(),
            Err(e) => {
                tracing::warn!(line = row.line, error = %e, "Sow import row insert failed");
                tally.record_rejection(RowRejection {
                    line: row.line,
                    kind: RejectionKind::Failed,
                    reason: "Database insert failed".to_string(),
                });
            }
        }
    }

    state.event_bus.publish(
        FarmEvent::new("import.completed")
            .for_organization(user.organization_id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "file_name": file_name,
                "imported": tally.imported,
                "skipped": tally.skipped,
                "failed": tally.failed,
            })),
    );

    Ok((StatusCode::OK, Json(tally)))
}
