//! Standalone background worker.
//!
//! Runs the periodic services (due-task reminder scan, digest delivery)
//! without the API server, for deployments that separate the web tier
//! from background processing. Events published here are persisted by the
//! worker's own persistence subscriber; in-app push is handled by the API
//! process when its notification router sees the persisted rows.

use std::sync::Arc;

use farrowtrack_events::{DigestScheduler, EventBus, EventPersistence, TaskReminder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farrowtrack_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = farrowtrack_db::create_pool(&database_url).await?;
    farrowtrack_db::health_check(&pool).await?;
    tracing::info!("Worker connected to database");

    let event_bus = Arc::new(EventBus::default());

    let persistence_handle = tokio::spawn(EventPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));

    let cancel = tokio_util::sync::CancellationToken::new();

    let reminder = TaskReminder::new(pool.clone(), Arc::clone(&event_bus));
    let reminder_cancel = cancel.clone();
    let reminder_handle = tokio::spawn(async move {
        reminder.run(reminder_cancel).await;
    });

    let digest = DigestScheduler::new(pool.clone());
    let digest_cancel = cancel.clone();
    let digest_handle = tokio::spawn(async move {
        digest.run(digest_cancel).await;
    });

    tracing::info!("Worker services started (task reminder, digest scheduler)");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Received shutdown signal");

    cancel.cancel();
    let _ = reminder_handle.await;
    let _ = digest_handle.await;

    drop(event_bus);
    let _ = persistence_handle.await;

    tracing::info!("Worker shut down cleanly");
    Ok(())
}
