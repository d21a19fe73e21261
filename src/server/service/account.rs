//! Read paths and direct edits for managed accounts.
//!
//! Reads are always scoped by a [`VisibilityFilter`], an account outside of it is reported
//! the same way as an account that does not exist.

use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        account::{
            AccountDto, AccountFilterParams, GrowthDto, MetricSampleDto, OwnershipSummaryDto,
            RecordMetricDto, StatusCountDto, UpdateAccountDto,
        },
        api::{PageDto, PageParams},
        status::{AccountCategory, AccountStatus, ImapStatus, Visibility},
        user::ModelTag,
    },
    server::{
        data::{
            account::AccountRepository, account_metric::AccountMetricRepository,
            device_clone::CloneRepository,
        },
        error::{request::RequestError, Error},
        model::db::{AccountMetricModel, AccountModel},
        service::{access::VisibilityFilter, retry::RetryContext},
    },
};

/// Default growth window in days
pub const DEFAULT_GROWTH_DAYS: i64 = 30;
/// Largest accepted growth window in days
pub const MAX_GROWTH_DAYS: i64 = 365;

impl TryFrom<AccountModel> for AccountDto {
    type Error = Error;

    fn try_from(account: AccountModel) -> Result<Self, Self::Error> {
        let status: AccountStatus = account.status.parse()?;

        Ok(Self {
            id: account.id,
            record_id: account.record_id,
            username: account.username,
            email: account.email,
            status,
            status_class: status.display_class().to_string(),
            imap_status: account.imap_status.parse::<ImapStatus>()?,
            device_id: account.device_id,
            clone_number: account.clone_number,
            package_name: account.package_name,
            owner_id: account.owner_id,
            visibility: account.visibility.parse::<Visibility>()?,
            model: account
                .model
                .as_deref()
                .map(str::parse::<ModelTag>)
                .transpose()?,
            category: account.category.parse::<AccountCategory>()?,
            updated_at: account.updated_at,
        })
    }
}

impl From<AccountMetricModel> for MetricSampleDto {
    fn from(metric: AccountMetricModel) -> Self {
        Self {
            followers: metric.followers,
            following: metric.following,
            posts: metric.posts,
            recorded_at: metric.recorded_at,
        }
    }
}

fn to_dtos(accounts: Vec<AccountModel>) -> Result<Vec<AccountDto>, Error> {
    accounts.into_iter().map(AccountDto::try_from).collect()
}

pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountService<'a> {
    /// Creates a new instance of [`AccountService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the accounts visible through `visibility` that match `filter`
    pub async fn get_page(
        &self,
        visibility: &VisibilityFilter,
        filter: AccountFilterParams,
        page: PageParams,
    ) -> Result<PageDto<AccountDto>, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();
        let visibility = visibility.clone();

        let account_page = ctx
            .execute_with_retry(
                &format!("list accounts for user ID {}", visibility.user_id()),
                || {
                    let db = db.clone();
                    let visibility = visibility.clone();
                    let filter = filter.clone();

                    Box::pin(async move {
                        let account_page = AccountRepository::new(&db)
                            .page_visible(
                                visibility.condition(),
                                &filter,
                                visibility.user_id(),
                                &page,
                            )
                            .await?;

                        Ok(account_page)
                    })
                },
            )
            .await?;

        Ok(PageDto {
            items: to_dtos(account_page.accounts)?,
            page: page.page,
            per_page: page.per_page(),
            total_items: account_page.total_items,
            total_pages: account_page.total_pages,
        })
    }

    /// Gets a single account if it exists and is visible
    pub async fn get_visible(
        &self,
        visibility: &VisibilityFilter,
        account_id: i32,
    ) -> Result<Option<AccountDto>, Error> {
        let account = self.find_visible(visibility, account_id).await?;

        account.map(AccountDto::try_from).transpose()
    }

    async fn find_visible(
        &self,
        visibility: &VisibilityFilter,
        account_id: i32,
    ) -> Result<Option<AccountModel>, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();

        let account = ctx
            .execute_with_retry(&format!("get account ID {}", account_id), || {
                let db = db.clone();

                Box::pin(async move {
                    let account = AccountRepository::new(&db).find_by_id(account_id).await?;

                    Ok(account)
                })
            })
            .await?;

        Ok(account.filter(|account| visibility.matches(account)))
    }

    /// Applies direct field edits, returns `None` if the account does not exist
    ///
    /// Clone placement, ownership and category have dedicated operations and cannot be
    /// changed here.
    pub async fn update(
        &self,
        account_id: i32,
        update: UpdateAccountDto,
    ) -> Result<Option<AccountDto>, Error> {
        if update.is_empty() {
            return Err(RequestError::Validation("No fields to update".to_string()).into());
        }
        if update.password.as_deref().is_some_and(str::is_empty) {
            return Err(RequestError::Validation("password must not be empty".to_string()).into());
        }

        let account = AccountRepository::new(self.db)
            .update_fields(account_id, &update)
            .await?;

        if account.is_some() {
            tracing::info!(account_id = account_id, "Updated account fields");
        }

        account.map(AccountDto::try_from).transpose()
    }

    /// Deletes an account, releasing the clone it occupies in the same transaction
    ///
    /// Returns `false` if the account does not exist.
    pub async fn delete(&self, account_id: i32) -> Result<bool, Error> {
        let txn = self.db.begin().await?;

        let account_repo = AccountRepository::new(&txn);
        let Some(account) = account_repo.find_by_id(account_id).await? else {
            txn.rollback().await?;
            return Ok(false);
        };

        if let (Some(device_id), Some(clone_number)) =
            (account.device_id.as_deref(), account.clone_number)
        {
            CloneRepository::new(&txn)
                .release(device_id, clone_number, &account.username)
                .await?;
        }

        account_repo.delete(account_id).await?;

        txn.commit().await?;

        tracing::info!(
            account_id = account_id,
            username = %account.username,
            "Deleted account"
        );

        Ok(true)
    }

    /// Summarises ownership, clone placement and status over the visible accounts
    pub async fn ownership_summary(
        &self,
        visibility: &VisibilityFilter,
    ) -> Result<OwnershipSummaryDto, Error> {
        let account_repo = AccountRepository::new(self.db);
        let visible = visibility.condition();

        let total = account_repo.count(visible.clone()).await?;
        let owned = account_repo
            .count(
                Condition::all()
                    .add(visible.clone())
                    .add(entity::account::Column::OwnerId.eq(visibility.user_id())),
            )
            .await?;
        let unowned = account_repo
            .count(
                Condition::all()
                    .add(visible.clone())
                    .add(entity::account::Column::OwnerId.is_null()),
            )
            .await?;
        let assigned_to_clone = account_repo
            .count(
                Condition::all()
                    .add(visible.clone())
                    .add(entity::account::Column::DeviceId.is_not_null()),
            )
            .await?;

        let by_status = account_repo
            .count_by_status(visible)
            .await?
            .into_iter()
            .map(|(status, count)| -> Result<StatusCountDto, Error> {
                Ok(StatusCountDto {
                    status: status.parse()?,
                    count: count.max(0) as u64,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OwnershipSummaryDto {
            visible: total,
            owned,
            unowned,
            assigned_to_clone,
            by_status,
        })
    }

    /// Lists every account owned by a user
    pub async fn get_user_accounts(&self, user_id: i32) -> Result<Vec<AccountDto>, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();

        let accounts = ctx
            .execute_with_retry(&format!("get accounts of user ID {}", user_id), || {
                let db = db.clone();

                Box::pin(async move {
                    let accounts = AccountRepository::new(&db)
                        .get_many_by_owner(user_id)
                        .await?;

                    Ok(accounts)
                })
            })
            .await?;

        to_dtos(accounts)
    }

    /// Records a metric sample, returns `None` if the account does not exist
    pub async fn record_metric(
        &self,
        account_id: i32,
        sample: RecordMetricDto,
    ) -> Result<Option<MetricSampleDto>, Error> {
        if sample.followers < 0 || sample.following < 0 || sample.posts < 0 {
            return Err(
                RequestError::Validation("Metric values must not be negative".to_string()).into(),
            );
        }

        if AccountRepository::new(self.db)
            .find_by_id(account_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let metric = AccountMetricRepository::new(self.db)
            .record(account_id, &sample)
            .await?;

        Ok(Some(metric.into()))
    }

    /// Growth of a visible account over the last `days` days
    ///
    /// Deltas compare the oldest and newest sample in the window and are zero with fewer
    /// than two samples.
    pub async fn get_growth(
        &self,
        visibility: &VisibilityFilter,
        account_id: i32,
        days: Option<i64>,
    ) -> Result<Option<GrowthDto>, Error> {
        let days = days.unwrap_or(DEFAULT_GROWTH_DAYS);
        if !(1..=MAX_GROWTH_DAYS).contains(&days) {
            return Err(RequestError::Validation(format!(
                "days must be between 1 and {}",
                MAX_GROWTH_DAYS
            ))
            .into());
        }

        if self.find_visible(visibility, account_id).await?.is_none() {
            return Ok(None);
        }

        let since = Utc::now().naive_utc() - Duration::days(days);
        let samples: Vec<MetricSampleDto> = AccountMetricRepository::new(self.db)
            .get_since(account_id, since)
            .await?
            .into_iter()
            .map(MetricSampleDto::from)
            .collect();

        let (followers_delta, following_delta, posts_delta) =
            match (samples.first(), samples.last()) {
                (Some(first), Some(last)) => (
                    last.followers - first.followers,
                    last.following - first.following,
                    last.posts - first.posts,
                ),
                _ => (0, 0, 0),
            };

        Ok(Some(GrowthDto {
            account_id,
            days,
            samples,
            followers_delta,
            following_delta,
            posts_delta,
        }))
    }
}
