use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Login failed due to an unknown email or wrong password")]
    InvalidCredentials,
    #[error("User does not have the role required for this action")]
    Forbidden,
}

impl AuthError {
    /// Logs the error at debug level and resolves the status and client-facing message
    pub fn into_parts(self) -> (StatusCode, String) {
        match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", self);

                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(user_id = %user_id, "{}", self);

                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            Self::InvalidCredentials => {
                tracing::debug!("{}", self);

                (
                    StatusCode::BAD_REQUEST,
                    "Invalid email or password".to_string(),
                )
            }
            Self::Forbidden => {
                tracing::debug!("{}", self);

                (
                    StatusCode::FORBIDDEN,
                    "You do not have permission to perform this action".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error) = self.into_parts();

        (status, Json(ErrorDto { error })).into_response()
    }
}
