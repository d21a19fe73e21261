//! Request and response models shared by the HTTP API and its consumers.

pub mod account;
pub mod api;
pub mod device;
pub mod status;
pub mod user;
