//! Spreadsheet import integration tests (multipart CSV upload).

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "farrowtrack-test-boundary";

/// Build a single-file multipart/form-data body by hand.
fn multipart_csv(file_name: &str, csv: &str) -> Body {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Body::from(body)
}

fn import_request(token: &str, file_name: &str, csv: &str) -> Request<Body> {
    Request::post("/api/v1/sows/import")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(multipart_csv(file_name, csv))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn import_tallies_per_row_outcomes(pool: PgPool) {
    let (_org, token) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool.clone());

    let csv = "ear_tag,name,birth_date,breed,status\n\
               S-1,Petunia,2023-01-15,Yorkshire,active\n\
               S-2,,01/20/2023,Duroc,culled\n\
               S-1,Dup,2023-01-15,Yorkshire,active\n\
               S-3,,not-a-date,Yorkshire,active\n\
               S-4,,2023-01-15,Yorkshire,retired";

    let response = app
        .oneshot(import_request(&token, "herd.csv", csv))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let tally = body_json(response).await;
    assert_eq!(tally["imported"], 2);
    assert_eq!(tally["skipped"], 1, "in-file duplicate ear tag");
    assert_eq!(tally["failed"], 2, "bad date and bad status");
    assert_eq!(tally["errors"].as_array().unwrap().len(), 3);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn import_skips_ear_tags_already_in_database(pool: PgPool) {
    let (_org, token) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool.clone());

    let csv = "ear_tag,name,birth_date,breed,status\nS-1,,2023-01-15,Yorkshire,active";

    let first = app
        .clone()
        .oneshot(import_request(&token, "herd.csv", csv))
        .await
        .unwrap();
    assert_eq!(body_json(first).await["imported"], 1);

    // Re-importing the same file skips the row.
    let second = app
        .oneshot(import_request(&token, "herd.csv", csv))
        .await
        .unwrap();
    let tally = body_json(second).await;
    assert_eq!(tally["imported"], 0);
    assert_eq!(tally["skipped"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsupported_file_type_is_rejected(pool: PgPool) {
    let (_org, token) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let response = app
        .oneshot(import_request(&token, "herd.pdf", "not a spreadsheet"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
