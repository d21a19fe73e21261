use axum::{extract::State, http::StatusCode, response::IntoResponse};
use portal::{
    model::account::{AssignToCloneDto, UnassignFromCloneDto},
    server::{
        controller::{
            clone::{assign_to_clone, unassign_from_clone},
            util::extract::ApiJson,
        },
        model::app::AppState,
    },
};
use portal_test_utils::prelude::*;

use super::{body_json, login_as};

fn assign_body(device_id: &str, clone_number: i32, username: &str) -> ApiJson<AssignToCloneDto> {
    ApiJson(AssignToCloneDto {
        device_id: Some(device_id.to_string()),
        clone_number: Some(clone_number),
        instagram_username: Some(username.to_string()),
    })
}

mod assign {
    use super::*;

    #[tokio::test]
    /// Expect 200 with both the clone and the account updated
    async fn assigns_account_to_empty_clone() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device()
            .insert_device_with_clones(TEST_DEVICE_ID, 2)
            .await?;
        let account = test.account().insert_account("alice").await?;
        login_as(&test, admin.id).await;

        let result = assign_to_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            assign_body(TEST_DEVICE_ID, 1, "alice"),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert!(body["message"].as_str().unwrap().contains("alice"));

        let clone = test.clone_at(TEST_DEVICE_ID, 1).await?;
        assert_eq!(clone.assigned_username.as_deref(), Some("alice"));
        assert_eq!(clone.status, "Assigned");

        let account = test.account_by_id(account.id).await?;
        assert_eq!(account.device_id.as_deref(), Some(TEST_DEVICE_ID));
        assert_eq!(account.clone_number, Some(1));
        assert_eq!(account.status, "Assigned");

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 with an error message when another account holds the clone
    async fn rejects_occupied_clone() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device().insert_device(TEST_DEVICE_ID, "Available").await?;
        test.account()
            .insert_account_in_clone("bob", TEST_DEVICE_ID, 1, "Logged In")
            .await?;
        let alice = test.account().insert_account("alice").await?;
        login_as(&test, admin.id).await;

        let result = assign_to_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            assign_body(TEST_DEVICE_ID, 1, "alice"),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("already assigned"));

        let clone = test.clone_at(TEST_DEVICE_ID, 1).await?;
        assert_eq!(clone.assigned_username.as_deref(), Some("bob"));

        let alice = test.account_by_id(alice.id).await?;
        assert!(alice.device_id.is_none());

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 for an unknown account
    async fn rejects_unknown_account() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device()
            .insert_device_with_clones(TEST_DEVICE_ID, 1)
            .await?;
        login_as(&test, admin.id).await;

        let result = assign_to_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            assign_body(TEST_DEVICE_ID, 0, "ghost"),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(body["error"], "Account ghost not found");

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 when a required field is missing
    async fn rejects_missing_fields() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        login_as(&test, admin.id).await;

        let result = assign_to_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            ApiJson(AssignToCloneDto {
                device_id: Some(TEST_DEVICE_ID.to_string()),
                clone_number: None,
                instagram_username: Some("alice".to_string()),
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    /// Expect 403 for a user without the admin role
    async fn forbidden_for_standard_user() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        test.device()
            .insert_device_with_clones(TEST_DEVICE_ID, 1)
            .await?;
        test.account().insert_account("alice").await?;
        login_as(&test, user.id).await;

        let result = assign_to_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            assign_body(TEST_DEVICE_ID, 0, "alice"),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let clone = test.clone_at(TEST_DEVICE_ID, 0).await?;
        assert!(clone.assigned_username.is_none());

        Ok(())
    }

    #[tokio::test]
    /// Expect 404 when nobody is logged in
    async fn not_found_without_session_user() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;

        let result = assign_to_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            assign_body(TEST_DEVICE_ID, 0, "alice"),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod unassign {
    use super::*;

    #[tokio::test]
    /// Expect 200 with the clone emptied and the account cleared
    async fn unassigns_occupied_clone() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device().insert_device(TEST_DEVICE_ID, "Available").await?;
        let account = test
            .account()
            .insert_account_in_clone("alice", TEST_DEVICE_ID, 3, "Assigned")
            .await?;
        login_as(&test, admin.id).await;

        let result = unassign_from_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            ApiJson(UnassignFromCloneDto {
                device_id: Some(TEST_DEVICE_ID.to_string()),
                clone_number: Some(3),
            }),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let clone = test.clone_at(TEST_DEVICE_ID, 3).await?;
        assert!(clone.assigned_username.is_none());
        assert_eq!(clone.status, "Available");

        let account = test.account_by_id(account.id).await?;
        assert!(account.device_id.is_none());
        assert!(account.clone_number.is_none());

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 when the clone holds no account
    async fn rejects_empty_clone() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device()
            .insert_device_with_clones(TEST_DEVICE_ID, 1)
            .await?;
        login_as(&test, admin.id).await;

        let result = unassign_from_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            ApiJson(UnassignFromCloneDto {
                device_id: Some(TEST_DEVICE_ID.to_string()),
                clone_number: Some(0),
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}
