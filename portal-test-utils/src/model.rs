//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main portal crate.

/// Type alias for portal user database model.
pub type UserModel = entity::portal_user::Model;

/// Type alias for managed account database model.
pub type AccountModel = entity::account::Model;

/// Type alias for device database model.
pub type DeviceModel = entity::device::Model;

/// Type alias for device clone slot database model.
pub type CloneModel = entity::device_clone::Model;

/// Type alias for account metric sample database model.
pub type AccountMetricModel = entity::account_metric::Model;
