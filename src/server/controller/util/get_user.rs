use tower_sessions::Session;

use crate::{
    model::user::UserRole,
    server::{
        error::{auth::AuthError, Error},
        model::{app::AppState, db::UserModel, session::user::SessionUserId},
        service::user::UserService,
    },
};

/// Retrieves user information from session and then from database
///
/// # Arguments
/// - `state`: Application state with database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(UserModel)`: User found
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: User ID not present in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User ID exists in session but not found in
///   database (session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<UserModel, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = UserService::new(&state.db).get_user(user_id).await? else {
        session.clear().await;

        tracing::warn!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(user)
}

/// Fails with [`AuthError::Forbidden`] unless the user has the admin role
pub fn require_admin(user: &UserModel) -> Result<(), Error> {
    let role: UserRole = user.role.parse()?;

    if role != UserRole::Admin {
        tracing::debug!(user_id = user.id, "Rejected non-admin user for admin action");

        return Err(Error::AuthError(AuthError::Forbidden));
    }

    Ok(())
}

/// Retrieves the session user and requires the admin role
pub async fn get_admin_from_session(
    state: &AppState,
    session: &Session,
) -> Result<UserModel, Error> {
    let user = get_user_from_session(state, session).await?;
    require_admin(&user)?;

    Ok(user)
}
