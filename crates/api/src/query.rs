//! Shared query parameter types for API handlers.

use chrono::NaiveDate;
use serde::Deserialize;

/// Status filter used by the herd list endpoints (`?status=active`).
#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

/// Query parameters for the scheduled-task listing.
#[derive(Debug, Deserialize)]
pub struct TaskFilter {
    /// Only tasks due on or before this date.
    pub due_before: Option<NaiveDate>,
    /// Include completed tasks in the listing.
    #[serde(default)]
    pub include_completed: bool,
}

/// Query parameters for the notification listing.
#[derive(Debug, Deserialize)]
pub struct NotificationFilter {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
}
