use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{LoginDto, UserDto},
    },
    server::{
        controller::util::{extract::ApiJson, get_user::get_user_from_session},
        error::{auth::AuthError, Error},
        model::{app::AppState, session::user::SessionUserId},
        service::user::UserService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Logs in with email and password
///
/// # Responses
/// - 200 (OK): Credentials valid, the user ID is stored in session
/// - 400 (Bad Request): Unknown email or wrong password
/// - 500 (Internal Server Error): Database or session error
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 400, description = "Invalid email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let Some(user) = UserService::new(&state.db)
        .authenticate(&payload.email, &payload.password)
        .await?
    else {
        return Err(AuthError::InvalidCredentials.into());
    };

    session.cycle_id().await?;
    SessionUserId::insert(&session, user.id).await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(UserDto::try_from(user)?))
}

/// Logs the user out by clearing their session
///
/// # Responses
/// - 200 (OK): Logged out, also returned when nobody was logged in
/// - 500 (Internal Server Error): There was an issue clearing the session
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    // Only clear sessions that hold a user
    if SessionUserId::remove(&session).await?.is_some() {
        session.clear().await;
    }

    Ok(Json(MessageDto::new("Logged out")))
}

/// Returns the logged in user with their model entitlements
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    Ok(Json(UserDto::try_from(user)?))
}
