//! Role names matching the `roles` seed data.

/// Full control over the organization, including user management.
pub const ROLE_OWNER: &str = "owner";

/// Day-to-day herd management; cannot manage users.
pub const ROLE_MANAGER: &str = "manager";

/// Data entry only.
pub const ROLE_WORKER: &str = "worker";

/// All recognised role names.
pub const VALID_ROLES: &[&str] = &[ROLE_OWNER, ROLE_MANAGER, ROLE_WORKER];
