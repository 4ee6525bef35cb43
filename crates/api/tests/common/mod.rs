//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::Router;
use farrowtrack_api::auth::jwt::{generate_access_token, JwtConfig};
use farrowtrack_api::config::ServerConfig;
use farrowtrack_api::router::build_app_router;
use farrowtrack_api::state::AppState;
use farrowtrack_api::ws::WsManager;
use farrowtrack_core::types::DbId;
use farrowtrack_db::models::organization::CreateOrganization;
use farrowtrack_db::models::user::CreateUser;
use farrowtrack_db::repositories::{OrganizationRepo, UserRepo};
use farrowtrack_events::EventBus;
use sqlx::PgPool;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        media_root: std::env::temp_dir().join("farrowtrack-test-media"),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(EventBus::default()),
    };
    build_app_router(state, &config)
}

/// Seed an organization with one owner user; returns `(organization_id,
/// bearer token)` ready for authenticated requests.
pub async fn seed_owner(pool: &PgPool) -> (DbId, String) {
    let org = OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: "Test Farm".to_string(),
        },
    )
    .await
    .unwrap();

    let role = UserRepo::find_role_by_name(pool, "owner")
        .await
        .unwrap()
        .expect("owner role is seeded");

    let user = UserRepo::create(
        pool,
        &CreateUser {
            organization_id: org.id,
            username: format!("owner-{}", org.id),
            email: format!("owner-{}@example.com", org.id),
            // Tests authenticate with a signed token, not a password.
            password_hash: "unused".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap();

    let token = generate_access_token(user.id, org.id, "owner", &test_config().jwt).unwrap();
    (org.id, token)
}
