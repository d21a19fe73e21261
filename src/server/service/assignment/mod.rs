//! Account placement in clone slots and account ownership.
//!
//! Every operation runs in a single transaction and either applies completely or writes
//! nothing. Expected precondition failures are returned as outcomes rather than errors so
//! callers can branch on them; only infrastructure failures surface as [`Error`].

#[cfg(test)]
mod tests;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::status::{AccountCategory, AccountStatus, CloneStatus, DeviceStatus, Visibility},
    server::{
        data::{
            account::AccountRepository, device::DeviceRepository,
            device_clone::CloneRepository, user::UserRepository,
        },
        error::Error,
        model::db::AccountModel,
        service::retry::RetryContext,
    },
};

/// Result of placing an account in a clone slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOutcome {
    /// The account now occupies the slot
    Assigned,
    AccountNotFound,
    DeviceNotFound,
    /// The device or the slot is in maintenance or broken
    CloneUnavailable,
    /// The slot holds a different account
    CloneOccupied,
}

impl AssignOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Assigned)
    }
}

/// Result of an ownership or classification change
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnershipOutcome {
    /// The change was written, holds the updated account
    Applied(AccountModel),
    AccountNotFound,
    UserNotFound,
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Checks and writes of [`AssignmentService::assign_to_clone`] against an open transaction
async fn try_assign<C: ConnectionTrait>(
    txn: &C,
    device_id: &str,
    clone_number: i32,
    username: &str,
) -> Result<AssignOutcome, Error> {
    let account_repo = AccountRepository::new(txn);
    let device_repo = DeviceRepository::new(txn);
    let clone_repo = CloneRepository::new(txn);

    let Some(account) = account_repo.find_by_username(username).await? else {
        return Ok(AssignOutcome::AccountNotFound);
    };
    let Some(device) = device_repo.find_by_id(device_id).await? else {
        return Ok(AssignOutcome::DeviceNotFound);
    };

    let device_status: DeviceStatus = device.status.parse()?;
    if !device_status.accepts_assignments() {
        return Ok(AssignOutcome::CloneUnavailable);
    }

    let clone = match clone_repo.ensure_exists(device_id, clone_number).await {
        Ok(clone) => clone,
        Err(err) if is_unique_violation(&err) => return Ok(AssignOutcome::CloneOccupied),
        Err(err) => return Err(err.into()),
    };

    match clone.assigned_username.as_deref() {
        Some(holder) if holder != username => return Ok(AssignOutcome::CloneOccupied),
        Some(_) => {}
        None => {
            let clone_status: CloneStatus = clone.status.parse()?;
            if clone_status != CloneStatus::Available {
                return Ok(AssignOutcome::CloneUnavailable);
            }
        }
    }

    if let Some(referencing) = account_repo.find_by_clone(device_id, clone_number).await? {
        if referencing.id != account.id {
            return Ok(AssignOutcome::CloneOccupied);
        }
    }

    if let (Some(previous_device), Some(previous_clone)) =
        (account.device_id.as_deref(), account.clone_number)
    {
        if previous_device != device_id || previous_clone != clone_number {
            clone_repo
                .release(previous_device, previous_clone, username)
                .await?;
        }
    }

    let current_status: AccountStatus = account.status.parse()?;
    let account_status = current_status.advance_to(AccountStatus::Assigned);
    let clone_status = CloneStatus::for_account(account_status);

    let claimed = match clone_repo
        .try_claim(device_id, clone_number, username, clone_status)
        .await
    {
        Ok(claimed) => claimed,
        Err(err) if is_unique_violation(&err) => return Ok(AssignOutcome::CloneOccupied),
        Err(err) => return Err(err.into()),
    };
    if !claimed {
        return Ok(AssignOutcome::CloneOccupied);
    }

    account_repo
        .set_clone(account, device_id, clone_number, account_status)
        .await?;

    Ok(AssignOutcome::Assigned)
}

pub struct AssignmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssignmentService<'a> {
    /// Creates a new instance of [`AssignmentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Places the account with `username` in the clone slot `(device_id, clone_number)`
    ///
    /// The slot is created if the device exists but the slot does not. An account already
    /// further along than `Assigned` keeps its status. If the account sat in another slot,
    /// that slot is released as part of the same transaction.
    ///
    /// Two concurrent calls for the same slot never both return [`AssignOutcome::Assigned`].
    pub async fn assign_to_clone(
        &self,
        device_id: &str,
        clone_number: i32,
        username: &str,
    ) -> Result<AssignOutcome, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();
        let device_id = device_id.to_string();
        let username = username.to_string();

        let outcome = ctx
            .execute_with_retry(
                &format!(
                    "assign account {} to clone {}/{}",
                    username, device_id, clone_number
                ),
                || {
                    let db = db.clone();
                    let device_id = device_id.clone();
                    let username = username.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let outcome =
                            try_assign(&txn, &device_id, clone_number, &username).await?;

                        if outcome.is_applied() {
                            txn.commit().await?;
                        } else {
                            txn.rollback().await?;
                        }

                        Ok(outcome)
                    })
                },
            )
            .await?;

        if outcome.is_applied() {
            tracing::info!(
                username = %username,
                device_id = %device_id,
                clone_number = clone_number,
                "Assigned account to clone"
            );
        } else {
            tracing::debug!(
                username = %username,
                device_id = %device_id,
                clone_number = clone_number,
                "Clone assignment not applied: {:?}",
                outcome
            );
        }

        Ok(outcome)
    }

    /// Empties the clone slot and clears the clone reference of the account it held
    ///
    /// The account's status is left as is. Returns `false` without writing anything if the
    /// slot does not exist or holds no account.
    pub async fn unassign_from_clone(
        &self,
        device_id: &str,
        clone_number: i32,
    ) -> Result<bool, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();
        let device_id = device_id.to_string();

        let released = ctx
            .execute_with_retry(
                &format!("unassign clone {}/{}", device_id, clone_number),
                || {
                    let db = db.clone();
                    let device_id = device_id.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        let clone_repo = CloneRepository::new(&txn);

                        let Some(username) = clone_repo
                            .find(&device_id, clone_number)
                            .await?
                            .and_then(|clone| clone.assigned_username)
                        else {
                            txn.rollback().await?;
                            return Ok(false);
                        };

                        if !clone_repo.release(&device_id, clone_number, &username).await? {
                            txn.rollback().await?;
                            return Ok(false);
                        }

                        AccountRepository::new(&txn)
                            .clear_clone(&device_id, clone_number)
                            .await?;

                        txn.commit().await?;

                        Ok(true)
                    })
                },
            )
            .await?;

        if released {
            tracing::info!(
                device_id = %device_id,
                clone_number = clone_number,
                "Released clone"
            );
        }

        Ok(released)
    }

    /// Makes `user_id` the owner of the account, replacing any previous owner
    ///
    /// Visibility defaults to [`Visibility::Private`] when not provided.
    pub async fn assign_ownership(
        &self,
        account_id: i32,
        user_id: i32,
        visibility: Option<Visibility>,
    ) -> Result<OwnershipOutcome, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();
        let visibility = visibility.unwrap_or_default();

        let outcome = ctx
            .execute_with_retry(
                &format!("assign account ID {} to user ID {}", account_id, user_id),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        let txn = db.begin().await?;

                        if UserRepository::new(&txn).get_by_id(user_id).await?.is_none() {
                            txn.rollback().await?;
                            return Ok(OwnershipOutcome::UserNotFound);
                        }

                        let Some(account) = AccountRepository::new(&txn)
                            .set_owner(account_id, Some(user_id), Some(visibility))
                            .await?
                        else {
                            txn.rollback().await?;
                            return Ok(OwnershipOutcome::AccountNotFound);
                        };

                        txn.commit().await?;

                        Ok(OwnershipOutcome::Applied(account))
                    })
                },
            )
            .await?;

        if matches!(outcome, OwnershipOutcome::Applied(_)) {
            tracing::info!(
                account_id = account_id,
                user_id = user_id,
                visibility = %visibility,
                "Assigned account ownership"
            );
        }

        Ok(outcome)
    }

    /// Removes the owner of the account, succeeding for accounts that have none
    pub async fn unassign_ownership(&self, account_id: i32) -> Result<OwnershipOutcome, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();

        let outcome = ctx
            .execute_with_retry(
                &format!("unassign ownership of account ID {}", account_id),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        let account = AccountRepository::new(&db)
                            .set_owner(account_id, None, None)
                            .await?;

                        Ok(match account {
                            Some(account) => OwnershipOutcome::Applied(account),
                            None => OwnershipOutcome::AccountNotFound,
                        })
                    })
                },
            )
            .await?;

        if matches!(outcome, OwnershipOutcome::Applied(_)) {
            tracing::info!(account_id = account_id, "Removed account ownership");
        }

        Ok(outcome)
    }

    /// Reclassifies the account as a managed trend finder, there is no inverse operation
    pub async fn convert_to_managed_trend_finder(
        &self,
        account_id: i32,
    ) -> Result<OwnershipOutcome, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();

        let outcome = ctx
            .execute_with_retry(
                &format!("convert account ID {} to managed trend finder", account_id),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        let account = AccountRepository::new(&db)
                            .set_category(account_id, AccountCategory::ManagedTrendFinder)
                            .await?;

                        Ok(match account {
                            Some(account) => OwnershipOutcome::Applied(account),
                            None => OwnershipOutcome::AccountNotFound,
                        })
                    })
                },
            )
            .await?;

        if matches!(outcome, OwnershipOutcome::Applied(_)) {
            tracing::info!(
                account_id = account_id,
                "Converted account to managed trend finder"
            );
        }

        Ok(outcome)
    }
}
