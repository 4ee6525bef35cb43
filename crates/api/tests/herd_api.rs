//! Herd CRUD integration tests: auth, sows, duplicate ear tags.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_sow(token: &str, payload: &Value) -> Request<Body> {
    Request::post("/api/v1/sows")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unauthenticated_requests_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = app
        .oneshot(Request::get("/api/v1/sows").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_list_sows(pool: PgPool) {
    let (_org, token) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let payload = json!({
        "ear_tag": "S-100",
        "name": "Petunia",
        "breed": "Yorkshire",
        "birth_date": "2023-01-15"
    });

    let response = app
        .clone()
        .oneshot(post_sow(&token, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["ear_tag"], "S-100");
    assert_eq!(created["status"], "active");

    let response = app
        .oneshot(
            Request::get("/api/v1/sows?status=active")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_ear_tag_maps_to_conflict(pool: PgPool) {
    let (_org, token) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let payload = json!({
        "ear_tag": "S-1",
        "breed": "Duroc",
        "birth_date": "2023-02-01"
    });

    let first = app
        .clone()
        .oneshot(post_sow(&token, &payload))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(post_sow(&token, &payload)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_status_filter_is_rejected(pool: PgPool) {
    let (_org, token) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let response = app
        .oneshot(
            Request::get("/api/v1/sows?status=retired")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sows_are_scoped_to_their_organization(pool: PgPool) {
    let (_org_a, token_a) = common::seed_owner(&pool).await;
    let (_org_b, token_b) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let payload = json!({
        "ear_tag": "S-1",
        "breed": "Duroc",
        "birth_date": "2023-02-01"
    });
    let response = app
        .clone()
        .oneshot(post_sow(&token_a, &payload))
        .await
        .unwrap();
    let created = body_json(response).await;
    let sow_id = created["id"].as_i64().unwrap();

    // The other organization cannot see it.
    let response = app
        .oneshot(
            Request::get(format!("/api/v1/sows/{sow_id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token_b}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
