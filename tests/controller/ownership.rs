use axum::{extract::State, http::StatusCode, response::IntoResponse};
use portal::{
    model::{
        account::{
            OwnershipMutationAction, OwnershipMutationDto, OwnershipQueryAction,
            OwnershipQueryParams,
        },
        status::Visibility,
    },
    server::{
        controller::{
            ownership::{get_account_ownership, update_account_ownership},
            util::extract::{EnvelopedJson, EnvelopedQuery},
        },
        model::app::AppState,
    },
};
use portal_test_utils::{fixtures::account::AccountOptions, prelude::*};

use super::{body_json, login_as};

fn mutation(
    action: OwnershipMutationAction,
    account_id: i32,
    user_id: Option<i32>,
) -> EnvelopedJson<OwnershipMutationDto> {
    EnvelopedJson(OwnershipMutationDto {
        action: Some(action),
        account_id: Some(account_id),
        user_id,
        visibility: None,
    })
}

mod get_account_ownership {
    use super::*;

    #[tokio::test]
    /// Expect counts over owned accounts and accounts of an entitled model only
    async fn summarises_visible_accounts() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        test.account()
            .insert_account_with(
                "owned",
                AccountOptions {
                    owner_id: Some(user.id),
                    ..Default::default()
                },
            )
            .await?;
        test.account()
            .insert_account_with(
                "shared_model",
                AccountOptions {
                    model: Some("Dillion"),
                    status: Some("Logged In"),
                    ..Default::default()
                },
            )
            .await?;
        test.account()
            .insert_account_with(
                "other_model",
                AccountOptions {
                    model: Some("katie"),
                    ..Default::default()
                },
            )
            .await?;
        login_as(&test, user.id).await;

        let resp = get_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            EnvelopedQuery(OwnershipQueryParams {
                action: Some(OwnershipQueryAction::Summary),
                user_id: None,
            }),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["visible"], 2);
        assert_eq!(body["data"]["owned"], 1);
        assert_eq!(body["data"]["unowned"], 1);
        assert_eq!(body["data"]["assigned_to_clone"], 0);

        Ok(())
    }

    #[tokio::test]
    /// Expect the requesting user's own accounts when no user ID is given
    async fn lists_own_accounts_by_default() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        test.account()
            .insert_account_with(
                "owned",
                AccountOptions {
                    owner_id: Some(user.id),
                    ..Default::default()
                },
            )
            .await?;
        test.account().insert_account("unowned").await?;
        login_as(&test, user.id).await;

        let resp = get_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            EnvelopedQuery(OwnershipQueryParams {
                action: Some(OwnershipQueryAction::UserAccounts),
                user_id: None,
            }),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        let accounts = body["data"].as_array().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0]["username"], "owned");

        Ok(())
    }

    #[tokio::test]
    /// Expect 403 enveloped error when a standard user asks for another user's accounts
    async fn forbidden_for_other_users_accounts() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        let admin = test.user().insert_admin().await?;
        login_as(&test, user.id).await;

        let resp = get_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            EnvelopedQuery(OwnershipQueryParams {
                action: Some(OwnershipQueryAction::UserAccounts),
                user_id: Some(admin.id),
            }),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());

        Ok(())
    }

    #[tokio::test]
    /// Expect 404 enveloped error when an admin asks for a user that does not exist
    async fn not_found_for_unknown_user() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        login_as(&test, admin.id).await;

        let resp = get_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            EnvelopedQuery(OwnershipQueryParams {
                action: Some(OwnershipQueryAction::UserAccounts),
                user_id: Some(admin.id + 100),
            }),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "User not found");

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 enveloped error without an action
    async fn rejects_missing_action() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        login_as(&test, user.id).await;

        let resp = get_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            EnvelopedQuery(OwnershipQueryParams {
                action: None,
                user_id: None,
            }),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(body["success"], false);

        Ok(())
    }
}

mod update_account_ownership {
    use super::*;

    #[tokio::test]
    /// Expect the account to be owned by the user with private visibility
    async fn assigns_owner() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        let user = test.user().insert_standard_user().await?;
        let account = test.account().insert_account("alice").await?;
        login_as(&test, admin.id).await;

        let resp = update_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            mutation(OwnershipMutationAction::Assign, account.id, Some(user.id)),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["owner_id"], user.id);
        assert_eq!(body["data"]["visibility"], "PRIVATE");

        let account = test.account_by_id(account.id).await?;
        assert_eq!(account.owner_id, Some(user.id));

        Ok(())
    }

    #[tokio::test]
    /// Expect the requested visibility to be stored
    async fn assigns_owner_with_shared_visibility() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        let user = test.user().insert_standard_user().await?;
        let account = test.account().insert_account("alice").await?;
        login_as(&test, admin.id).await;

        let resp = update_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            EnvelopedJson(OwnershipMutationDto {
                action: Some(OwnershipMutationAction::Assign),
                account_id: Some(account.id),
                user_id: Some(user.id),
                visibility: Some(Visibility::Shared),
            }),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::OK);

        let account = test.account_by_id(account.id).await?;
        assert_eq!(account.visibility, "SHARED");

        Ok(())
    }

    #[tokio::test]
    /// Expect 404 enveloped error for an account that does not exist
    async fn not_found_for_unknown_account() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        login_as(&test, admin.id).await;

        let resp = update_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            mutation(OwnershipMutationAction::Assign, 999, Some(admin.id)),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Account not found");

        Ok(())
    }

    #[tokio::test]
    /// Expect 404 enveloped error and no owner change for a user that does not exist
    async fn not_found_for_unknown_user() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        let account = test.account().insert_account("alice").await?;
        login_as(&test, admin.id).await;

        let resp = update_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            mutation(OwnershipMutationAction::Assign, account.id, Some(admin.id + 100)),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = body_json(resp).await;
        assert_eq!(body["error"], "User not found");

        let account = test.account_by_id(account.id).await?;
        assert!(account.owner_id.is_none());

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 enveloped error when assigning without a user ID
    async fn rejects_assign_without_user() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        let account = test.account().insert_account("alice").await?;
        login_as(&test, admin.id).await;

        let resp = update_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            mutation(OwnershipMutationAction::Assign, account.id, None),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    /// Expect the owner to be removed
    async fn unassigns_owner() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        let account = test
            .account()
            .insert_account_with(
                "alice",
                AccountOptions {
                    owner_id: Some(admin.id),
                    ..Default::default()
                },
            )
            .await?;
        login_as(&test, admin.id).await;

        let resp = update_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            mutation(OwnershipMutationAction::Unassign, account.id, None),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::OK);

        let account = test.account_by_id(account.id).await?;
        assert!(account.owner_id.is_none());

        Ok(())
    }

    #[tokio::test]
    /// Expect the account category to become managed trend finder
    async fn converts_to_managed_trend_finder() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        let account = test.account().insert_account("alice").await?;
        login_as(&test, admin.id).await;

        let resp = update_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            mutation(OwnershipMutationAction::ConvertToMl, account.id, None),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["data"]["category"], "managed_trend_finder");

        Ok(())
    }

    #[tokio::test]
    /// Expect 403 enveloped error for a user without the admin role
    async fn forbidden_for_standard_user() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        let account = test.account().insert_account("alice").await?;
        login_as(&test, user.id).await;

        let resp = update_account_ownership(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            mutation(OwnershipMutationAction::Assign, account.id, Some(user.id)),
        )
        .await
        .into_response();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = body_json(resp).await;
        assert_eq!(body["success"], false);

        let account = test.account_by_id(account.id).await?;
        assert!(account.owner_id.is_none());

        Ok(())
    }
}
