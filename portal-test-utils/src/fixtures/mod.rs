//! Test fixture modules for database record creation.
//!
//! - `user` - Portal users with a role
//! - `device` - Devices and their clone slots
//! - `account` - Managed accounts, ownership, clone placement and metric samples

pub mod account;
pub mod device;
pub mod user;
