//! Event-to-notification routing engine.
//!
//! [`NotificationRouter`] subscribes to the farm event bus and routes each
//! event to affected users based on their notification preferences,
//! Do-Not-Disturb settings, and digest configuration.

use std::sync::Arc;

use axum::extract::ws::Message;
use farrowtrack_core::channels::{CHANNEL_DIGEST, CHANNEL_IN_APP};
use farrowtrack_core::types::DbId;
use farrowtrack_db::repositories::{
    EventRepo, NotificationPreferenceRepo, NotificationRepo, UserRepo,
};
use farrowtrack_db::DbPool;
use farrowtrack_events::FarmEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes farm events to user notifications.
///
/// Consumes events from the broadcast channel and, for each event,
/// determines the target users, checks their preferences, and delivers
/// notifications through the appropriate channels.
pub struct NotificationRouter {
    pool: DbPool,
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    /// Create a new router with the given database pool and WebSocket manager.
    pub fn new(pool: DbPool, ws_manager: Arc<WsManager>) -> Self {
        Self { pool, ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](farrowtrack_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<FarmEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Route a single event to all affected users.
    async fn route_event(
        &self,
        event: &FarmEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let target_users = self.determine_targets(event).await?;

        for user_id in target_users {
            self.route_to_user(user_id, event).await?;
        }

        Ok(())
    }

    /// Evaluate preferences and deliver to a single user.
    async fn route_to_user(
        &self,
        user_id: DbId,
        event: &FarmEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Resolve event type metadata.
        let event_type =
            match EventRepo::get_event_type_by_name(&self.pool, &event.event_type).await? {
                Some(et) => et,
                None => {
                    tracing::warn!(
                        event_type = %event.event_type,
                        "Unknown event type, skipping notification"
                    );
                    return Ok(());
                }
            };

        // Check per-event-type preference; default is enabled.
        let pref =
            NotificationPreferenceRepo::get_for_event_type(&self.pool, user_id, event_type.id)
                .await?;

        let is_enabled = pref.as_ref().map(|p| p.is_enabled).unwrap_or(true);
        if !is_enabled {
            return Ok(());
        }

        // Check Do-Not-Disturb settings.
        let settings = NotificationPreferenceRepo::get_settings(&self.pool, user_id).await?;
        let is_dnd = settings.as_ref().is_some_and(|s| {
            if !s.dnd_enabled {
                return false;
            }
            match s.dnd_until {
                Some(until) => chrono::Utc::now() < until,
                None => true, // Indefinite DND
            }
        });

        if is_dnd && !event_type.is_critical {
            return Ok(()); // DND blocks non-critical events
        }

        // Check digest mode.
        let is_digest = settings.as_ref().is_some_and(|s| s.digest_enabled);
        if is_digest && !event_type.is_critical {
            // Queue for the digest flush instead of delivering now.
            if let Some(event_id) =
                EventRepo::latest_event_id_by_type(&self.pool, &event.event_type).await?
            {
                NotificationRepo::create(&self.pool, event_id, user_id, CHANNEL_DIGEST)
                    .await
                    .ok();
            }
            return Ok(());
        }

        // Deliver through configured channels.
        let channels: Vec<String> = pref
            .as_ref()
            .and_then(|p| serde_json::from_value(p.channels.clone()).ok())
            .unwrap_or_else(|| vec![CHANNEL_IN_APP.to_string()]);

        for channel in &channels {
            match channel.as_str() {
                CHANNEL_IN_APP => self.deliver_in_app(user_id, event).await,
                // Email and webhook fan-out run through the delivery
                // services in farrowtrack-events when configured.
                other => {
                    tracing::debug!(channel = other, "Channel handled by external delivery");
                }
            }
        }

        Ok(())
    }

    /// Determine which users should receive a notification for the event.
    ///
    /// Herd events concern the whole operation, so every active member of
    /// the owning organization is targeted. Events with no organization
    /// scope fall back to the actor alone.
    async fn determine_targets(&self, event: &FarmEvent) -> Result<Vec<DbId>, sqlx::Error> {
        match event.organization_id {
            Some(org) => UserRepo::active_user_ids(&self.pool, org).await,
            None => Ok(event.actor_user_id.into_iter().collect()),
        }
    }

    /// Create a notification record in the database and push a WebSocket
    /// message.
    ///
    /// The persistence service writes events asynchronously, so the
    /// persisted row may not exist yet; in that case the database record
    /// is skipped and only the push goes out.
    async fn deliver_in_app(&self, user_id: DbId, event: &FarmEvent) {
        if let Ok(Some(event_id)) =
            EventRepo::latest_event_id_by_type(&self.pool, &event.event_type).await
        {
            NotificationRepo::create(&self.pool, event_id, user_id, CHANNEL_IN_APP)
                .await
                .ok();
        }

        let msg = serde_json::json!({
            "type": "notification",
            "event_type": event.event_type,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let ws_msg = Message::Text(msg.to_string().into());
        self.ws_manager.send_to_user(user_id, ws_msg).await;
    }
}
