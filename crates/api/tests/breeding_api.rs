//! Breeding recorder workflow integration tests.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed_post(token: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn create_sow(app: &axum::Router, token: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(authed_post(
            token,
            "/api/v1/sows",
            &json!({
                "ear_tag": "S-1",
                "breed": "Yorkshire",
                "birth_date": "2023-01-15"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn recording_a_breeding_creates_expected_farrowing(pool: PgPool) {
    let (_org, token) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let sow_id = create_sow(&app, &token).await;
    let bred_at = Utc::now().date_naive() - Duration::days(3);

    let response = app
        .oneshot(authed_post(
            &token,
            &format!("/api/v1/sows/{sow_id}/breedings"),
            &json!({
                "method": "ai",
                "bred_at": bred_at,
                "boar_description": "Duroc straw #4"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let recorded = body_json(response).await;
    assert_eq!(recorded["attempt"]["outcome"], "pending");

    let expected = bred_at + Duration::days(114);
    assert_eq!(
        recorded["farrowing"]["expected_date"],
        json!(expected.to_string())
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn future_breeding_date_is_rejected(pool: PgPool) {
    let (_org, token) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let sow_id = create_sow(&app, &token).await;
    let tomorrow = Utc::now().date_naive() + Duration::days(1);

    let response = app
        .oneshot(authed_post(
            &token,
            &format!("/api/v1/sows/{sow_id}/breedings"),
            &json!({ "method": "natural", "bred_at": tomorrow }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn breeding_expands_active_breeding_protocols(pool: PgPool) {
    let (_org, token) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let sow_id = create_sow(&app, &token).await;

    // A breeding-triggered protocol with one task 21 days out.
    let response = app
        .clone()
        .oneshot(authed_post(
            &token,
            "/api/v1/protocols",
            &json!({ "name": "Post-breeding", "trigger_event": "breeding" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let protocol_id = body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(authed_post(
            &token,
            &format!("/api/v1/protocols/{protocol_id}/tasks"),
            &json!({ "title": "Pregnancy check", "days_offset": 21 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let bred_at = Utc::now().date_naive();
    let response = app
        .clone()
        .oneshot(authed_post(
            &token,
            &format!("/api/v1/sows/{sow_id}/breedings"),
            &json!({ "method": "ai", "bred_at": bred_at }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let recorded = body_json(response).await;
    assert_eq!(recorded["scheduled_tasks_created"], 1);

    // The expanded task is due 21 days after breeding.
    let response = app
        .oneshot(
            Request::get("/api/v1/tasks")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let tasks = body_json(response).await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Pregnancy check");
    assert_eq!(
        tasks[0]["due_date"],
        json!((bred_at + Duration::days(21)).to_string())
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn protocol_with_outstanding_tasks_cannot_be_deleted(pool: PgPool) {
    let (_org, token) = common::seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let sow_id = create_sow(&app, &token).await;

    let response = app
        .clone()
        .oneshot(authed_post(
            &token,
            "/api/v1/protocols",
            &json!({ "name": "Post-breeding", "trigger_event": "breeding" }),
        ))
        .await
        .unwrap();
    let protocol_id = body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(authed_post(
            &token,
            &format!("/api/v1/protocols/{protocol_id}/tasks"),
            &json!({ "title": "Pregnancy check", "days_offset": 21 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Trigger the expansion.
    let response = app
        .clone()
        .oneshot(authed_post(
            &token,
            &format!("/api/v1/sows/{sow_id}/breedings"),
            &json!({ "method": "ai", "bred_at": Utc::now().date_naive() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::delete(format!("/api/v1/protocols/{protocol_id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
