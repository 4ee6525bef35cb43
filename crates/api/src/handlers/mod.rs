//! HTTP handlers, one module per resource.

pub mod auth;
pub mod boar;
pub mod breeding;
pub mod budget;
pub mod dashboard;
pub mod farm_settings;
pub mod farrowing;
pub mod housing;
pub mod import;
pub mod matrix;
pub mod media;
pub mod notification;
pub mod piglet;
pub mod protocol;
pub mod scheduled_task;
pub mod sow;
pub mod users;
