//! Database model type aliases.
//!
//! Convenient aliases for SeaORM entity models used throughout the server, so signatures
//! don't need to reach into the generated `entity` crate directly.

/// Type alias for portal user database model.
///
/// # Fields (from `entity::portal_user::Model`)
/// - `id` - Primary key, unique user identifier
/// - `email` - Unique login email, also the source of model entitlements
/// - `password_hash` - PBKDF2 hash in PHC string format
/// - `role` - `ADMIN` or `USER`
/// - `created_at` - Timestamp when the user was created
pub type UserModel = entity::portal_user::Model;

/// Type alias for managed account database model.
///
/// # Fields (from `entity::account::Model`)
/// - `id` - Primary key
/// - `record_id` - External record identifier (unique)
/// - `username` / `password` - Login credentials (username unique)
/// - `email` / `email_password` - Mailbox credentials
/// - `status` - One of the account statuses, see [`crate::model::status::AccountStatus`]
/// - `imap_status` - `On` / `Off`
/// - `device_id` / `clone_number` - Clone slot the account is placed in, set together
/// - `package_name` - Assigned app package
/// - `owner_id` - Owning user, nullable
/// - `visibility` - `PRIVATE` / `SHARED`
/// - `model` - Model tag granting visibility to entitled users
/// - `category` - `standard` / `managed_trend_finder`
pub type AccountModel = entity::account::Model;

/// Type alias for device database model.
pub type DeviceModel = entity::device::Model;

/// Type alias for device clone slot database model.
///
/// # Fields (from `entity::device_clone::Model`)
/// - `device_id` / `clone_number` - Slot address, unique together
/// - `status` - See [`crate::model::status::CloneStatus`]
/// - `health` - See [`crate::model::status::CloneHealth`]
/// - `assigned_username` - Username of the account placed in the slot
pub type CloneModel = entity::device_clone::Model;

/// Type alias for account metric sample database model.
pub type AccountMetricModel = entity::account_metric::Model;
