use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_USER_KEY: &str = "portal.session.user";

/// Login marker written to the session after a successful password login
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionUserId {
    pub user_id: i32,
}

impl SessionUserId {
    /// Marks the session as logged in as `user_id`
    pub async fn insert(session: &Session, user_id: i32) -> Result<(), Error> {
        session
            .insert(SESSION_USER_KEY, SessionUserId { user_id })
            .await?;

        Ok(())
    }

    /// ID of the logged in user, `None` for anonymous sessions
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        let login: Option<SessionUserId> = session.get(SESSION_USER_KEY).await?;

        Ok(login.map(|login| login.user_id))
    }

    /// Drops the login marker, returning the ID it held
    pub async fn remove(session: &Session) -> Result<Option<i32>, Error> {
        let login: Option<SessionUserId> = session.remove(SESSION_USER_KEY).await?;

        Ok(login.map(|login| login.user_id))
    }
}
