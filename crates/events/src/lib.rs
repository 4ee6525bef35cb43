//! FarrowTrack event bus and notification infrastructure.
//!
//! Building blocks for the platform-wide event system:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`FarmEvent`] — the canonical domain event envelope.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` table.
//! - [`delivery`] — external delivery channels (webhook, email).
//! - [`DigestScheduler`] — periodic digest notification processor.
//! - [`TaskReminder`] — daily scan that publishes `task.due` events for
//!   scheduled tasks at or past their due date.

pub mod bus;
pub mod delivery;
pub mod digest;
pub mod persistence;
pub mod reminder;

pub use bus::{EventBus, FarmEvent};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use delivery::webhook::WebhookDelivery;
pub use digest::DigestScheduler;
pub use persistence::EventPersistence;
pub use reminder::TaskReminder;
