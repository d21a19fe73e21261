use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PageDto, PageParams},
        device::{
            CloneDto, DeviceDto, DeviceFilterParams, DeviceSummaryDto, UpdateCloneDto,
            UpsertDeviceDto,
        },
    },
    server::{
        controller::util::{
            extract::{ApiJson, ApiQuery},
            get_user::{get_admin_from_session, get_user_from_session},
        },
        error::{request::RequestError, Error},
        model::app::AppState,
        service::device::DeviceService,
    },
};

pub static DEVICE_TAG: &str = "device";

/// Lists devices with clone occupancy counts
#[utoipa::path(
    get,
    path = "/api/devices",
    tag = DEVICE_TAG,
    params(PageParams, DeviceFilterParams),
    responses(
        (status = 200, description = "Page of devices", body = PageDto<DeviceSummaryDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_devices(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiQuery(filter): ApiQuery<DeviceFilterParams>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let devices = DeviceService::new(&state.db)
        .get_page(filter.status, page)
        .await?;

    Ok(Json(devices))
}

/// Gets a device with all of its clone slots
#[utoipa::path(
    get,
    path = "/api/devices/{device_id}",
    tag = DEVICE_TAG,
    params(("device_id" = String, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device with clones", body = DeviceDto),
        (status = 404, description = "Device or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_device(
    State(state): State<AppState>,
    session: Session,
    Path(device_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let device = DeviceService::new(&state.db)
        .get_device(&device_id)
        .await?
        .ok_or_else(|| RequestError::NotFound(format!("Device {} not found", device_id)))?;

    Ok(Json(device))
}

/// Creates or updates a device and provisions its clone slots, requires the admin role
#[utoipa::path(
    put,
    path = "/api/devices/{device_id}",
    tag = DEVICE_TAG,
    params(("device_id" = String, Path, description = "Device ID")),
    request_body = UpsertDeviceDto,
    responses(
        (status = 200, description = "Device with clones", body = DeviceDto),
        (status = 400, description = "Invalid clone count", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upsert_device(
    State(state): State<AppState>,
    session: Session,
    Path(device_id): Path<String>,
    ApiJson(payload): ApiJson<UpsertDeviceDto>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let device = DeviceService::new(&state.db)
        .upsert_device(&device_id, payload)
        .await?;

    Ok(Json(device))
}

/// Updates the status or health of a clone slot, requires the admin role
#[utoipa::path(
    put,
    path = "/api/devices/{device_id}/clones/{clone_number}",
    tag = DEVICE_TAG,
    params(
        ("device_id" = String, Path, description = "Device ID"),
        ("clone_number" = i32, Path, description = "Clone number within the device")
    ),
    request_body = UpdateCloneDto,
    responses(
        (status = 200, description = "Updated clone", body = CloneDto),
        (status = 400, description = "Status inconsistent with the clone's assignment", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "Clone or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_clone(
    State(state): State<AppState>,
    session: Session,
    Path((device_id, clone_number)): Path<(String, i32)>,
    ApiJson(payload): ApiJson<UpdateCloneDto>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let clone = DeviceService::new(&state.db)
        .update_clone(&device_id, clone_number, payload)
        .await?
        .ok_or_else(|| {
            RequestError::NotFound(format!(
                "Clone {} on device {} not found",
                clone_number, device_id
            ))
        })?;

    Ok(Json(clone))
}
