//! Helpers shared by controllers: session user resolution, role checks and request
//! extractors.

pub mod extract;
pub mod get_user;
