use axum::{extract::State, http::StatusCode, response::IntoResponse};
use portal::{
    model::user::{CreateUserDto, UserRole},
    server::{
        controller::{user::create_user, util::extract::ApiJson},
        model::app::AppState,
    },
};
use portal_test_utils::prelude::*;

use super::{body_json, login_as};

fn new_user(email: &str, password: &str) -> ApiJson<CreateUserDto> {
    ApiJson(CreateUserDto {
        email: email.to_string(),
        password: password.to_string(),
        role: UserRole::User,
    })
}

#[tokio::test]
/// Expect 201 with the model entitlements of the created user
async fn creates_user() -> Result<(), TestError> {
    let test = test_setup_with_portal_tables!()?;
    let admin = test.user().insert_admin().await?;
    login_as(&test, admin.id).await;

    let result = create_user(
        State(test.app_state::<AppState>()),
        test.session.clone(),
        new_user("carol@Outlook.com", TEST_PASSWORD),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_json(resp).await;
    assert_eq!(body["role"], "USER");
    assert_eq!(body["models"], serde_json::json!(["katie"]));
    assert!(body.get("password_hash").is_none());

    Ok(())
}

#[tokio::test]
/// Expect 400 when the email is already taken
async fn rejects_duplicate_email() -> Result<(), TestError> {
    let test = test_setup_with_portal_tables!()?;
    let admin = test.user().insert_admin().await?;
    login_as(&test, admin.id).await;

    let result = create_user(
        State(test.app_state::<AppState>()),
        test.session.clone(),
        new_user(TEST_ADMIN_EMAIL, TEST_PASSWORD),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 400 for a password below the minimum length
async fn rejects_short_password() -> Result<(), TestError> {
    let test = test_setup_with_portal_tables!()?;
    let admin = test.user().insert_admin().await?;
    login_as(&test, admin.id).await;

    let result = create_user(
        State(test.app_state::<AppState>()),
        test.session.clone(),
        new_user("dave@gmail.com", "short"),
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
    login_as(&test, user.id).await;

    let result = create_user(
        State(test.app_state::<AppState>()),
        test.session.clone(),
        new_user("dave@gmail.com", TEST_PASSWORD),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
