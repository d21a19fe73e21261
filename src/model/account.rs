use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::{
    status::{AccountCategory, AccountStatus, ImapStatus, Visibility},
    user::ModelTag,
};

/// A managed account as shown on the dashboard, credentials excluded
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountDto {
    pub id: i32,
    pub record_id: String,
    pub username: String,
    pub email: Option<String>,
    pub status: AccountStatus,
    /// Display class tag for `status`
    pub status_class: String,
    pub imap_status: ImapStatus,
    pub device_id: Option<String>,
    pub clone_number: Option<i32>,
    pub package_name: Option<String>,
    pub owner_id: Option<i32>,
    pub visibility: Visibility,
    pub model: Option<ModelTag>,
    pub category: AccountCategory,
    pub updated_at: NaiveDateTime,
}

/// Direct field edits, absent fields are left unchanged
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAccountDto {
    pub password: Option<String>,
    pub email: Option<String>,
    pub email_password: Option<String>,
    pub status: Option<AccountStatus>,
    pub imap_status: Option<ImapStatus>,
    pub package_name: Option<String>,
    pub model: Option<ModelTag>,
}

impl UpdateAccountDto {
    pub fn is_empty(&self) -> bool {
        self.password.is_none()
            && self.email.is_none()
            && self.email_password.is_none()
            && self.status.is_none()
            && self.imap_status.is_none()
            && self.package_name.is_none()
            && self.model.is_none()
    }
}

/// Filters for listing accounts
#[derive(Clone, Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccountFilterParams {
    pub status: Option<AccountStatus>,
    pub device_id: Option<String>,
    /// Only accounts owned by the requesting user
    #[serde(default)]
    pub owned: bool,
    /// Case-sensitive username substring
    pub search: Option<String>,
}

/// Body of `POST /api/clones/assign`
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignToCloneDto {
    pub device_id: Option<String>,
    pub clone_number: Option<i32>,
    pub instagram_username: Option<String>,
}

/// Body of `POST /api/clones/unassign`
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnassignFromCloneDto {
    pub device_id: Option<String>,
    pub clone_number: Option<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OwnershipQueryAction {
    Summary,
    UserAccounts,
}

#[derive(Clone, Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnershipQueryParams {
    pub action: Option<OwnershipQueryAction>,
    /// Defaults to the requesting user, other users require the admin role
    pub user_id: Option<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OwnershipMutationAction {
    Assign,
    Unassign,
    #[serde(rename = "convert-to-ml")]
    ConvertToMl,
}

/// Body of `POST /api/account-ownership`
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnershipMutationDto {
    pub action: Option<OwnershipMutationAction>,
    pub account_id: Option<i32>,
    pub user_id: Option<i32>,
    pub visibility: Option<Visibility>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: AccountStatus,
    pub count: u64,
}

/// Ownership summary over the accounts visible to a user
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnershipSummaryDto {
    pub visible: u64,
    pub owned: u64,
    pub unowned: u64,
    pub assigned_to_clone: u64,
    pub by_status: Vec<StatusCountDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RecordMetricDto {
    pub followers: i64,
    pub following: i64,
    pub posts: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricSampleDto {
    pub followers: i64,
    pub following: i64,
    pub posts: i64,
    pub recorded_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GrowthParams {
    /// Window size in days, defaults to 30
    pub days: Option<i64>,
}

/// Change in account metrics between the first and last sample of a window
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GrowthDto {
    pub account_id: i32,
    pub days: i64,
    pub samples: Vec<MetricSampleDto>,
    pub followers_delta: i64,
    pub following_delta: i64,
    pub posts_delta: i64,
}
