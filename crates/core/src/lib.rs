//! Pure domain logic for the FarrowTrack breeding-operation platform.
//!
//! This crate has no internal dependencies and no I/O: everything here is
//! types, constants, and pure functions shared by the repository layer, the
//! API, and the background worker. Date arithmetic for the breeding cycle,
//! protocol-to-task expansion, ear-notch assignment, and spreadsheet import
//! validation all live here so they can be unit tested without a database.

pub mod breeding;
pub mod budget;
pub mod channels;
pub mod ear_notch;
pub mod error;
pub mod export;
pub mod housing;
pub mod import;
pub mod matrix;
pub mod protocol;
pub mod roles;
pub mod types;
pub mod validation;
