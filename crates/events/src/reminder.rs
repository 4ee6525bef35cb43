//! Due-task reminder scanner.
//!
//! [`TaskReminder`] periodically scans `scheduled_tasks` for rows at or
//! past their due date that nobody has been reminded about, publishes a
//! `task.due` event for each, and stamps `reminded_at` so a task is only
//! announced once.

use std::sync::Arc;
use std::time::Duration;

use farrowtrack_db::repositories::ScheduledTaskRepo;
use farrowtrack_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::bus::{EventBus, FarmEvent};

/// How often the scanner checks for newly due tasks.
const REMINDER_CHECK_INTERVAL: Duration = Duration::from_secs(1800);

/// Background service that turns due scheduled tasks into events.
pub struct TaskReminder {
    pool: DbPool,
    bus: Arc<EventBus>,
}

impl TaskReminder {
    /// Create a new reminder scanner.
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        Self { pool, bus }
    }

    /// Run the reminder loop until the token is cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(REMINDER_CHECK_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Task reminder cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.scan_once().await {
                        tracing::error!(error = %e, "Failed to scan for due tasks");
                    }
                }
            }
        }
    }

    /// One scan pass: publish `task.due` for every unreminded due task.
    pub async fn scan_once(&self) -> Result<usize, sqlx::Error> {
        let today = chrono::Utc::now().date_naive();
        let due = ScheduledTaskRepo::list_due_unreminded(&self.pool, today).await?;
        let count = due.len();

        for task in due {
            self.bus.publish(
                FarmEvent::new("task.due")
                    .for_organization(task.organization_id)
                    .with_source("scheduled_task", task.id)
                    .with_payload(serde_json::json!({
                        "title": task.title,
                        "due_date": task.due_date,
                        "sow_id": task.sow_id,
                    })),
            );
            ScheduledTaskRepo::mark_reminded(&self.pool, task.id).await?;
        }

        if count > 0 {
            tracing::info!(count, "Published due-task reminders");
        }

        Ok(count)
    }
}
