//! Client portal backend.
//!
//! Manages social-media accounts, the devices and device clone slots they run
//! on, and the users that own them.

pub mod model;
pub mod server;
