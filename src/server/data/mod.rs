//! Data access layer repositories.
//!
//! Repositories wrap SeaORM queries for a single table each and are generic over
//! [`sea_orm::ConnectionTrait`], so the same repository runs against the connection pool or
//! inside a transaction.

pub mod account;
pub mod account_metric;
pub mod device;
pub mod device_clone;
pub mod user;
