use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Expected failures caused by the request itself, never retried.
///
/// The contained message is shown to the client as-is.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Missing or malformed required field
    #[error("{0}")]
    Validation(String),
    /// Referenced account, user, device or clone does not exist
    #[error("{0}")]
    NotFound(String),
    /// Precondition failure such as an occupied clone
    #[error("{0}")]
    Conflict(String),
}

impl RequestError {
    /// Logs the error at debug level and resolves the status and client-facing message
    pub fn into_parts(self) -> (StatusCode, String) {
        tracing::debug!("Request rejected: {}", self);

        match self {
            Self::Validation(message) | Self::Conflict(message) => {
                (StatusCode::BAD_REQUEST, message)
            }
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let (status, error) = self.into_parts();

        (status, Json(ErrorDto { error })).into_response()
    }
}
