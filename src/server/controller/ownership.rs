//! `{success, data | error}` endpoints for account ownership.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        account::{
            AccountDto, OwnershipMutationAction, OwnershipMutationDto, OwnershipQueryAction,
            OwnershipQueryParams, OwnershipSummaryDto,
        },
        api::ApiResponse,
    },
    server::{
        controller::util::{
            extract::{EnvelopedJson, EnvelopedQuery},
            get_user::{get_admin_from_session, get_user_from_session, require_admin},
        },
        error::{request::RequestError, EnvelopedError, Error},
        model::app::AppState,
        service::{
            access::VisibilityFilter,
            account::AccountService,
            assignment::{AssignmentService, OwnershipOutcome},
            user::UserService,
        },
    },
};

pub static OWNERSHIP_TAG: &str = "account-ownership";

/// Reads ownership information
///
/// - `action=summary`: counts over the accounts visible to the current user
/// - `action=user-accounts`: accounts owned by `user_id`, defaults to the current user,
///   other users require the admin role
#[utoipa::path(
    get,
    path = "/api/account-ownership",
    tag = OWNERSHIP_TAG,
    params(OwnershipQueryParams),
    responses(
        (status = 200, description = "Ownership summary, or `ApiResponse<Vec<AccountDto>>` for `user-accounts`", body = ApiResponse<OwnershipSummaryDto>),
        (status = 400, description = "Missing or unknown action", body = ApiResponse<String>),
        (status = 403, description = "Admin role required", body = ApiResponse<String>),
        (status = 404, description = "User not found", body = ApiResponse<String>),
        (status = 500, description = "Internal server error", body = ApiResponse<String>)
    ),
)]
pub async fn get_account_ownership(
    State(state): State<AppState>,
    session: Session,
    EnvelopedQuery(params): EnvelopedQuery<OwnershipQueryParams>,
) -> Result<Response, EnvelopedError> {
    let user = get_user_from_session(&state, &session).await?;

    let Some(action) = params.action else {
        let error = RequestError::Validation("action is required".to_string());

        return Err(Error::from(error).into());
    };

    match action {
        OwnershipQueryAction::Summary => {
            let visibility = VisibilityFilter::for_user(&user)?;
            let summary = AccountService::new(&state.db)
                .ownership_summary(&visibility)
                .await?;

            Ok(Json(ApiResponse::ok(summary)).into_response())
        }
        OwnershipQueryAction::UserAccounts => {
            let user_id = params.user_id.unwrap_or(user.id);

            if user_id != user.id {
                require_admin(&user)?;

                if UserService::new(&state.db).get_user(user_id).await?.is_none() {
                    return Err(Error::from(RequestError::NotFound(
                        "User not found".to_string(),
                    ))
                    .into());
                }
            }

            let accounts = AccountService::new(&state.db)
                .get_user_accounts(user_id)
                .await?;

            Ok(Json(ApiResponse::ok(accounts)).into_response())
        }
    }
}

/// Changes account ownership or classification, requires the admin role
///
/// - `assign`: `user_id` becomes the owner, `visibility` defaults to `PRIVATE`
/// - `unassign`: removes the owner, succeeds for unowned accounts
/// - `convert-to-ml`: marks the account as a managed trend finder
#[utoipa::path(
    post,
    path = "/api/account-ownership",
    tag = OWNERSHIP_TAG,
    request_body = OwnershipMutationDto,
    responses(
        (status = 200, description = "Change applied", body = ApiResponse<AccountDto>),
        (status = 400, description = "Missing or invalid fields", body = ApiResponse<String>),
        (status = 403, description = "Admin role required", body = ApiResponse<String>),
        (status = 404, description = "Account or user not found", body = ApiResponse<String>),
        (status = 500, description = "Internal server error", body = ApiResponse<String>)
    ),
)]
pub async fn update_account_ownership(
    State(state): State<AppState>,
    session: Session,
    EnvelopedJson(payload): EnvelopedJson<OwnershipMutationDto>,
) -> Result<Response, EnvelopedError> {
    get_admin_from_session(&state, &session).await?;

    let action = payload
        .action
        .ok_or_else(|| Error::from(RequestError::Validation("action is required".to_string())))?;
    let account_id = payload.account_id.ok_or_else(|| {
        Error::from(RequestError::Validation("account_id is required".to_string()))
    })?;

    let assignment_service = AssignmentService::new(&state.db);

    let outcome = match action {
        OwnershipMutationAction::Assign => {
            let user_id = payload.user_id.ok_or_else(|| {
                Error::from(RequestError::Validation(
                    "user_id is required to assign ownership".to_string(),
                ))
            })?;

            assignment_service
                .assign_ownership(account_id, user_id, payload.visibility)
                .await?
        }
        OwnershipMutationAction::Unassign => {
            assignment_service.unassign_ownership(account_id).await?
        }
        OwnershipMutationAction::ConvertToMl => {
            assignment_service
                .convert_to_managed_trend_finder(account_id)
                .await?
        }
    };

    match outcome {
        OwnershipOutcome::Applied(account) => {
            let account = AccountDto::try_from(account)?;

            Ok(Json(ApiResponse::ok(account)).into_response())
        }
        OwnershipOutcome::AccountNotFound => {
            Err(Error::from(RequestError::NotFound("Account not found".to_string())).into())
        }
        OwnershipOutcome::UserNotFound => {
            Err(Error::from(RequestError::NotFound("User not found".to_string())).into())
        }
    }
}
