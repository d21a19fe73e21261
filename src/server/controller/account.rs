use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        account::{
            AccountDto, AccountFilterParams, GrowthDto, GrowthParams, MetricSampleDto,
            RecordMetricDto, UpdateAccountDto,
        },
        api::{ErrorDto, MessageDto, PageDto, PageParams},
    },
    server::{
        controller::util::{
            extract::{ApiJson, ApiQuery},
            get_user::{get_admin_from_session, get_user_from_session},
        },
        error::{request::RequestError, Error},
        model::app::AppState,
        service::{access::VisibilityFilter, account::AccountService},
    },
};

pub static ACCOUNT_TAG: &str = "account";

fn account_not_found() -> Error {
    RequestError::NotFound("Account not found".to_string()).into()
}

/// Lists the accounts visible to the current user
#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = ACCOUNT_TAG,
    params(PageParams, AccountFilterParams),
    responses(
        (status = 200, description = "Page of visible accounts", body = PageDto<AccountDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_accounts(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiQuery(filter): ApiQuery<AccountFilterParams>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let visibility = VisibilityFilter::for_user(&user)?;

    let accounts = AccountService::new(&state.db)
        .get_page(&visibility, filter, page)
        .await?;

    Ok(Json(accounts))
}

/// Gets a single account visible to the current user
#[utoipa::path(
    get,
    path = "/api/accounts/{account_id}",
    tag = ACCOUNT_TAG,
    params(("account_id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account", body = AccountDto),
        (status = 404, description = "Account or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_account(
    State(state): State<AppState>,
    session: Session,
    Path(account_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let visibility = VisibilityFilter::for_user(&user)?;

    let account = AccountService::new(&state.db)
        .get_visible(&visibility, account_id)
        .await?
        .ok_or_else(account_not_found)?;

    Ok(Json(account))
}

/// Edits account fields, requires the admin role
#[utoipa::path(
    patch,
    path = "/api/accounts/{account_id}",
    tag = ACCOUNT_TAG,
    params(("account_id" = i32, Path, description = "Account ID")),
    request_body = UpdateAccountDto,
    responses(
        (status = 200, description = "Updated account", body = AccountDto),
        (status = 400, description = "No fields to update", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "Account or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_account(
    State(state): State<AppState>,
    session: Session,
    Path(account_id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateAccountDto>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let account = AccountService::new(&state.db)
        .update(account_id, payload)
        .await?
        .ok_or_else(account_not_found)?;

    Ok(Json(account))
}

/// Deletes an account and frees its clone, requires the admin role
#[utoipa::path(
    delete,
    path = "/api/accounts/{account_id}",
    tag = ACCOUNT_TAG,
    params(("account_id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account deleted", body = MessageDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "Account or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_account(
    State(state): State<AppState>,
    session: Session,
    Path(account_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    if !AccountService::new(&state.db).delete(account_id).await? {
        return Err(account_not_found());
    }

    Ok(Json(MessageDto::new(format!("Account {} deleted", account_id))))
}

/// Follower, following and post growth of a visible account
#[utoipa::path(
    get,
    path = "/api/accounts/{account_id}/growth",
    tag = ACCOUNT_TAG,
    params(("account_id" = i32, Path, description = "Account ID"), GrowthParams),
    responses(
        (status = 200, description = "Growth over the window", body = GrowthDto),
        (status = 400, description = "Window out of range", body = ErrorDto),
        (status = 404, description = "Account or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_account_growth(
    State(state): State<AppState>,
    session: Session,
    Path(account_id): Path<i32>,
    ApiQuery(params): ApiQuery<GrowthParams>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let visibility = VisibilityFilter::for_user(&user)?;

    let growth = AccountService::new(&state.db)
        .get_growth(&visibility, account_id, params.days)
        .await?
        .ok_or_else(account_not_found)?;

    Ok(Json(growth))
}

/// Records a metric sample for an account, requires the admin role
#[utoipa::path(
    post,
    path = "/api/accounts/{account_id}/metrics",
    tag = ACCOUNT_TAG,
    params(("account_id" = i32, Path, description = "Account ID")),
    request_body = RecordMetricDto,
    responses(
        (status = 201, description = "Sample recorded", body = MetricSampleDto),
        (status = 400, description = "Negative metric values", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "Account or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn record_account_metric(
    State(state): State<AppState>,
    session: Session,
    Path(account_id): Path<i32>,
    ApiJson(payload): ApiJson<RecordMetricDto>,
) -> Result<impl IntoResponse, Error> {
    get_admin_from_session(&state, &session).await?;

    let sample = AccountService::new(&state.db)
        .record_metric(account_id, payload)
        .await?
        .ok_or_else(account_not_found)?;

    Ok((StatusCode::CREATED, Json(sample)))
}
