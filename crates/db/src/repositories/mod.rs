//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every query on a domain
//! table filters by `organization_id`; that filter is the tenancy
//! boundary for the whole application.

pub mod boar_repo;
pub mod breeding_repo;
pub mod budget_repo;
pub mod dashboard_repo;
pub mod event_repo;
pub mod farm_settings_repo;
pub mod farrowing_repo;
pub mod housing_repo;
pub mod matrix_repo;
pub mod notification_preference_repo;
pub mod notification_repo;
pub mod organization_repo;
pub mod piglet_repo;
pub mod protocol_repo;
pub mod scheduled_task_repo;
pub mod session_repo;
pub mod sow_repo;
pub mod user_repo;

pub use boar_repo::BoarRepo;
pub use breeding_repo::BreedingRepo;
pub use budget_repo::BudgetRepo;
pub use dashboard_repo::DashboardRepo;
pub use event_repo::EventRepo;
pub use farm_settings_repo::FarmSettingsRepo;
pub use farrowing_repo::FarrowingRepo;
pub use housing_repo::HousingRepo;
pub use matrix_repo::MatrixRepo;
pub use notification_preference_repo::NotificationPreferenceRepo;
pub use notification_repo::NotificationRepo;
pub use organization_repo::OrganizationRepo;
pub use piglet_repo::PigletRepo;
pub use protocol_repo::ProtocolRepo;
pub use scheduled_task_repo::ScheduledTaskRepo;
pub use session_repo::SessionRepo;
pub use sow_repo::SowRepo;
pub use user_repo::UserRepo;
