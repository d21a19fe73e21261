pub use super::account::Entity as Account;
pub use super::account_metric::Entity as AccountMetric;
pub use super::device::Entity as Device;
pub use super::device_clone::Entity as DeviceClone;
pub use super::portal_user::Entity as PortalUser;
