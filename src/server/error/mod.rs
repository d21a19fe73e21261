//! Error types for the portal server.
//!
//! This module provides the error handling system with specialized error types for the
//! different domains (authentication, configuration, request validation). All errors
//! implement `IntoResponse` for Axum HTTP responses and use `thiserror` for ergonomic error
//! definitions. Unexpected errors are logged and reported to clients with a generic message.

pub mod auth;
pub mod config;
pub mod request;
pub mod retry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::{ApiResponse, ErrorDto},
    server::error::{auth::AuthError, config::ConfigError, request::RequestError},
};

/// Main error type for the portal server.
///
/// Aggregates all domain-specific error types and external library errors into a single
/// error type. `#[from]` enables conversion from underlying error types via `?`.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (session, credentials, role checks)
/// - Request errors (validation failures, missing entities, assignment conflicts)
/// - External library errors (database, sessions)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, credentials, authorization).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Request error (validation, not found, conflict).
    #[error(transparent)]
    RequestError(#[from] RequestError),
    /// Parse error (failed to parse a stored or session value).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Password hashing or hash parsing failed.
    #[error("Failed to hash password: {0}")]
    PasswordHashError(String),
    /// Internal error indicating a bug in the portal's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
}

impl From<crate::model::status::UnknownVariant> for Error {
    fn from(err: crate::model::status::UnknownVariant) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl Error {
    /// Resolves the HTTP status and the client-facing message for this error.
    ///
    /// Expected failures are logged at debug level, everything else is logged as an error
    /// and reported with a generic message so internal details never reach the client.
    pub fn into_parts(self) -> (StatusCode, String) {
        match self {
            Self::AuthError(err) => err.into_parts(),
            Self::RequestError(err) => err.into_parts(),
            err => InternalServerError(err).into_parts(),
        }
    }

    /// Wraps the error so it is rendered with the `{success: false, error}` envelope
    pub fn enveloped(self) -> EnvelopedError {
        EnvelopedError(self)
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures and assignment conflicts
/// - 403 Forbidden - Authenticated user lacks the required role
/// - 404 Not Found - Missing users or resources
/// - 500 Internal Server Error - All other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error) = self.into_parts();

        (status, Json(ErrorDto { error })).into_response()
    }
}

/// An [`Error`] rendered as `{"success": false, "error": "..."}`
pub struct EnvelopedError(pub Error);

impl From<Error> for EnvelopedError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for EnvelopedError {
    fn into_response(self) -> Response {
        let (status, error) = self.0.into_parts();

        (status, Json(ApiResponse::<()>::err(error))).into_response()
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> InternalServerError<E> {
    /// Logs the wrapped error and returns the generic 500 status and message
    pub fn into_parts(self) -> (StatusCode, String) {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    }
}

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        let (status, error) = self.into_parts();

        (status, Json(ErrorDto { error })).into_response()
    }
}
