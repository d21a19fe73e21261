use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    constant::{TEST_ADMIN_EMAIL, TEST_USER_EMAIL},
    error::TestError,
    model::UserModel,
    TestSetup,
};

impl TestSetup {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> UserFixtures<'a> {
    /// Inserts a user with an unusable password hash
    ///
    /// # Arguments
    /// - `email` - Unique email, drives model entitlements
    /// - `role` - `"ADMIN"` or `"USER"`
    pub async fn insert_user(&self, email: &str, role: &str) -> Result<UserModel, TestError> {
        Ok(
            entity::prelude::PortalUser::insert(entity::portal_user::ActiveModel {
                email: ActiveValue::Set(email.to_string()),
                password_hash: ActiveValue::Set("!".to_string()),
                role: ActiveValue::Set(role.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    /// Inserts the default admin user ([`TEST_ADMIN_EMAIL`])
    pub async fn insert_admin(&self) -> Result<UserModel, TestError> {
        self.insert_user(TEST_ADMIN_EMAIL, "ADMIN").await
    }

    /// Inserts the default standard user ([`TEST_USER_EMAIL`])
    pub async fn insert_standard_user(&self) -> Result<UserModel, TestError> {
        self.insert_user(TEST_USER_EMAIL, "USER").await
    }
}
