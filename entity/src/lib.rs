//! SeaORM entities for the client portal database.

pub mod prelude;

pub mod account;
pub mod account_metric;
pub mod device;
pub mod device_clone;
pub mod portal_user;
