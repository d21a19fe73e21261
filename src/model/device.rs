use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::status::{CloneHealth, CloneStatus, DeviceStatus};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CloneDto {
    pub clone_number: i32,
    pub status: CloneStatus,
    pub status_class: String,
    pub health: CloneHealth,
    pub assigned_username: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DeviceSummaryDto {
    pub id: String,
    pub status: DeviceStatus,
    pub status_class: String,
    pub clone_count: u64,
    pub occupied_clones: u64,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DeviceDto {
    pub id: String,
    pub status: DeviceStatus,
    pub status_class: String,
    pub clones: Vec<CloneDto>,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeviceFilterParams {
    pub status: Option<DeviceStatus>,
}

/// Body of `PUT /api/devices/{device_id}`
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UpsertDeviceDto {
    pub status: DeviceStatus,
    /// Ensures clone slots `0..clone_count` exist
    #[serde(default)]
    pub clone_count: i32,
}

/// Body of `PUT /api/devices/{device_id}/clones/{clone_number}`
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCloneDto {
    pub status: Option<CloneStatus>,
    pub health: Option<CloneHealth>,
}
