//! HTTP controller endpoints for the portal web API.
//!
//! Axum handlers resolve the session user, check roles, validate typed request bodies and
//! hand off to the service layer. Every handler is documented with utoipa for the OpenAPI
//! document served next to Swagger UI.

pub mod account;
pub mod auth;
pub mod clone;
pub mod device;
pub mod ownership;
pub mod user;
pub mod util;
