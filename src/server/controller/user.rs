use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{CreateUserDto, UserDto},
    },
    server::{
        controller::util::{extract::ApiJson, get_user::get_admin_from_session},
        error::Error,
        model::app::AppState,
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "user";

/// Creates a portal user, requires the admin role
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid email, short password or email already taken", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<CreateUserDto>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let user = UserService::new(&state.db).create_user(payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}
