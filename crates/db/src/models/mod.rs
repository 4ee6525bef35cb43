//! Row structs and DTOs, one module per table group.
//!
//! Row structs derive `FromRow` + `Serialize`; `Create*`/`Update*` DTOs
//! derive `Deserialize` and use `Option` fields for partial updates.

pub mod boar;
pub mod breeding;
pub mod budget;
pub mod dashboard;
pub mod event;
pub mod farm_settings;
pub mod farrowing;
pub mod housing;
pub mod matrix;
pub mod notification;
pub mod organization;
pub mod piglet;
pub mod protocol;
pub mod scheduled_task;
pub mod session;
pub mod sow;
pub mod user;
