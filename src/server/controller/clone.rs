use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        account::{AssignToCloneDto, UnassignFromCloneDto},
        api::{ErrorDto, MessageDto},
    },
    server::{
        controller::util::{extract::ApiJson, get_user::get_admin_from_session},
        error::{request::RequestError, Error},
        model::app::AppState,
        service::assignment::{AssignOutcome, AssignmentService},
    },
};

pub static CLONE_TAG: &str = "clone";

fn required_device_and_clone(
    device_id: Option<String>,
    clone_number: Option<i32>,
) -> Result<(String, i32), Error> {
    let device_id = device_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| RequestError::Validation("deviceId is required".to_string()))?;

    let clone_number = clone_number
        .ok_or_else(|| RequestError::Validation("cloneNumber is required".to_string()))?;
    if clone_number < 0 {
        return Err(
            RequestError::Validation("cloneNumber must not be negative".to_string()).into(),
        );
    }

    Ok((device_id, clone_number))
}

/// Places an account in a device clone slot
///
/// # Responses
/// - 200 (OK): The account now occupies the clone
/// - 400 (Bad Request): Missing fields, unknown account or device, clone unavailable or
///   occupied by another account
/// - 403 (Forbidden): Admin role required
#[utoipa::path(
    post,
    path = "/api/clones/assign",
    tag = CLONE_TAG,
    request_body = AssignToCloneDto,
    responses(
        (status = 200, description = "Account assigned to clone", body = MessageDto),
        (status = 400, description = "Assignment not applied", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_to_clone(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<AssignToCloneDto>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let (device_id, clone_number) =
        required_device_and_clone(payload.device_id, payload.clone_number)?;
    let username = payload
        .instagram_username
        .map(|username| username.trim().to_string())
        .filter(|username| !username.is_empty())
        .ok_or_else(|| RequestError::Validation("instagramUsername is required".to_string()))?;

    let outcome = AssignmentService::new(&state.db)
        .assign_to_clone(&device_id, clone_number, &username)
        .await?;

    let error = match outcome {
        AssignOutcome::Assigned => {
            return Ok(Json(MessageDto::new(format!(
                "Account {} assigned to clone {} on device {}",
                username, clone_number, device_id
            ))));
        }
        AssignOutcome::AccountNotFound => format!("Account {} not found", username),
        AssignOutcome::DeviceNotFound => format!("Device {} not found", device_id),
        AssignOutcome::CloneUnavailable => format!(
            "Clone {} on device {} is not available for assignment",
            clone_number, device_id
        ),
        AssignOutcome::CloneOccupied => format!(
            "Clone {} on device {} is already assigned to another account",
            clone_number, device_id
        ),
    };

    Err(RequestError::Conflict(error).into())
}

/// Removes the account from a device clone slot
///
/// # Responses
/// - 200 (OK): The clone is empty and the account no longer references it
/// - 400 (Bad Request): Missing fields or no account assigned to the clone
/// - 403 (Forbidden): Admin role required
#[utoipa::path(
    post,
    path = "/api/clones/unassign",
    tag = CLONE_TAG,
    request_body = UnassignFromCloneDto,
    responses(
        (status = 200, description = "Account removed from clone", body = MessageDto),
        (status = 400, description = "No account assigned to the clone", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unassign_from_clone(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<UnassignFromCloneDto>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let (device_id, clone_number) =
        required_device_and_clone(payload.device_id, payload.clone_number)?;

    let released = AssignmentService::new(&state.db)
        .unassign_from_clone(&device_id, clone_number)
        .await?;

    if !released {
        return Err(RequestError::Conflict(format!(
            "No account is assigned to clone {} on device {}",
            clone_number, device_id
        ))
        .into());
    }

    Ok(Json(MessageDto::new(format!(
        "Clone {} on device {} unassigned",
        clone_number, device_id
    ))))
}
