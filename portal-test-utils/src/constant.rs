//! Standard values used across fixtures.

/// Plaintext password for users created through the portal's user service in tests.
pub static TEST_PASSWORD: &str = "correct horse battery staple";

/// Email of the default admin fixture user, outside every model-granting domain.
pub static TEST_ADMIN_EMAIL: &str = "admin@corp.com";

/// Email of the default standard fixture user, grants the `Dillion` model.
pub static TEST_USER_EMAIL: &str = "bob@gmail.com";

/// Device ID used by fixtures when a test needs a single device.
pub static TEST_DEVICE_ID: &str = "dev1";
