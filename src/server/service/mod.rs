//! Service layer for business logic.
//!
//! Services coordinate repositories, run multi-step writes inside transactions and
//! convert database models into API DTOs. The assignment engine and the access resolver
//! are the core of the portal, the remaining services are read paths and direct edits
//! around them.

pub mod access;
pub mod account;
pub mod assignment;
pub mod device;
pub mod retry;
pub mod user;
