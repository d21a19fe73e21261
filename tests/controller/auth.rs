use axum::{extract::State, http::StatusCode, response::IntoResponse};
use portal::{
    model::user::{CreateUserDto, LoginDto, UserRole},
    server::{
        controller::{
            auth::{get_user, login, logout},
            util::extract::ApiJson,
        },
        model::{app::AppState, session::user::SessionUserId},
        service::user::UserService,
    },
};
use portal_test_utils::prelude::*;

use super::{body_json, login_as};

/// Creates a user through the service so the stored password hash is real
async fn create_user_with_password(test: &TestSetup) -> i32 {
    let user = UserService::new(&test.state.db)
        .create_user(CreateUserDto {
            email: TEST_USER_EMAIL.to_string(),
            password: TEST_PASSWORD.to_string(),
            role: UserRole::User,
        })
        .await
        .unwrap();

    user.id
}

mod login {
    use super::*;

    #[tokio::test]
    /// Expect 200 with the user and the user ID stored in session for valid credentials
    async fn logs_in_with_valid_credentials() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user_id = create_user_with_password(&test).await;

        let result = login(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            ApiJson(LoginDto {
                email: TEST_USER_EMAIL.to_string(),
                password: TEST_PASSWORD.to_string(),
            }),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["email"], TEST_USER_EMAIL);
        assert_eq!(body["models"], serde_json::json!(["Dillion"]));

        let session_user_id = SessionUserId::get(&test.session).await.unwrap();
        assert_eq!(session_user_id, Some(user_id));

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 and an empty session for a wrong password
    async fn rejects_wrong_password() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        create_user_with_password(&test).await;

        let result = login(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            ApiJson(LoginDto {
                email: TEST_USER_EMAIL.to_string(),
                password: "wrong password".to_string(),
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 for an email with no user
    async fn rejects_unknown_email() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;

        let result = login(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            ApiJson(LoginDto {
                email: "nobody@example.com".to_string(),
                password: TEST_PASSWORD.to_string(),
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    /// Expect 500 when the user table does not exist
    async fn error_when_required_tables_dont_exist() -> Result<(), TestError> {
        let test = test_setup_with_tables!()?;

        let result = login(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            ApiJson(LoginDto {
                email: TEST_USER_EMAIL.to_string(),
                password: TEST_PASSWORD.to_string(),
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        Ok(())
    }
}

mod logout {
    use super::*;

    #[tokio::test]
    /// Expect 200 and the user ID removed from session
    async fn clears_user_from_session() -> Result<(), TestError> {
        let test = test_setup_with_tables!()?;
        login_as(&test, 1).await;

        let result = logout(test.session.clone()).await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

        Ok(())
    }

    #[tokio::test]
    /// Expect 200 even when nobody is logged in
    async fn succeeds_without_session_user() -> Result<(), TestError> {
        let test = test_setup_with_tables!()?;

        let result = logout(test.session.clone()).await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        Ok(())
    }
}

mod get_user {
    use super::*;

    #[tokio::test]
    /// Expect 200 with the role and model entitlements of the logged in user
    async fn returns_logged_in_user() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        login_as(&test, admin.id).await;

        let result = get_user(State(test.app_state::<AppState>()), test.session.clone()).await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["role"], "ADMIN");
        assert_eq!(
            body["models"],
            serde_json::json!(["Dillion", "katie", "Premium", "Basic"])
        );

        Ok(())
    }

    #[tokio::test]
    /// Expect 404 when nobody is logged in
    async fn not_found_without_session_user() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;

        let result = get_user(State(test.app_state::<AppState>()), test.session.clone()).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    /// Expect 404 and a cleared session when the session user no longer exists
    async fn clears_session_for_deleted_user() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        login_as(&test, 42).await;

        let result = get_user(State(test.app_state::<AppState>()), test.session.clone()).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

        Ok(())
    }
}
