use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveValue, DbErr, EntityTrait};

use crate::{
    error::TestError,
    model::{AccountMetricModel, AccountModel},
    TestSetup,
};

impl TestSetup {
    pub fn account(&self) -> AccountFixtures<'_> {
        AccountFixtures { setup: self }
    }

    /// Reads the current state of an account, failing if it does not exist
    pub async fn account_by_id(&self, account_id: i32) -> Result<AccountModel, TestError> {
        entity::prelude::Account::find_by_id(account_id)
            .one(&self.state.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("account ID {}", account_id)).into())
    }
}

pub struct AccountFixtures<'a> {
    setup: &'a TestSetup,
}

/// Optional account fields, defaults to an unowned `Unused` account with no model
#[derive(Clone, Debug, Default)]
pub struct AccountOptions<'o> {
    pub status: Option<&'o str>,
    pub owner_id: Option<i32>,
    pub model: Option<&'o str>,
    pub device: Option<(&'o str, i32)>,
}

impl<'a> AccountFixtures<'a> {
    /// Inserts an unowned `Unused` account
    pub async fn insert_account(&self, username: &str) -> Result<AccountModel, TestError> {
        self.insert_account_with(username, AccountOptions::default())
            .await
    }

    /// Inserts an account with the provided options
    ///
    /// When `options.device` is set only the account side is written, pair it with
    /// [`crate::fixtures::device::DeviceFixtures::insert_clone`] to keep both sides consistent.
    pub async fn insert_account_with(
        &self,
        username: &str,
        options: AccountOptions<'_>,
    ) -> Result<AccountModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Account::insert(entity::account::ActiveModel {
                record_id: ActiveValue::Set(format!("rec_{}", username)),
                username: ActiveValue::Set(username.to_string()),
                password: ActiveValue::Set("account_password".to_string()),
                email: ActiveValue::Set(Some(format!("{}@mail.test", username))),
                email_password: ActiveValue::Set(None),
                status: ActiveValue::Set(options.status.unwrap_or("Unused").to_string()),
                imap_status: ActiveValue::Set("Off".to_string()),
                device_id: ActiveValue::Set(options.device.map(|(d, _)| d.to_string())),
                clone_number: ActiveValue::Set(options.device.map(|(_, c)| c)),
                package_name: ActiveValue::Set(None),
                owner_id: ActiveValue::Set(options.owner_id),
                visibility: ActiveValue::Set("PRIVATE".to_string()),
                model: ActiveValue::Set(options.model.map(str::to_string)),
                category: ActiveValue::Set("standard".to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    /// Inserts an account placed in a clone, writing both the account and clone records
    pub async fn insert_account_in_clone(
        &self,
        username: &str,
        device_id: &str,
        clone_number: i32,
        status: &str,
    ) -> Result<AccountModel, TestError> {
        let clone_status = match status {
            "Logged In" | "Login Error" => status,
            _ => "Assigned",
        };

        self.setup
            .device()
            .insert_clone(device_id, clone_number, clone_status, Some(username))
            .await?;

        self.insert_account_with(
            username,
            AccountOptions {
                status: Some(status),
                device: Some((device_id, clone_number)),
                ..Default::default()
            },
        )
        .await
    }

    /// Inserts a metric sample for an account
    pub async fn insert_metric(
        &self,
        account_id: i32,
        followers: i64,
        recorded_at: NaiveDateTime,
    ) -> Result<AccountMetricModel, TestError> {
        Ok(
            entity::prelude::AccountMetric::insert(entity::account_metric::ActiveModel {
                account_id: ActiveValue::Set(account_id),
                followers: ActiveValue::Set(followers),
                following: ActiveValue::Set(100),
                posts: ActiveValue::Set(10),
                recorded_at: ActiveValue::Set(recorded_at),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
