use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, DeleteResult, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::{
    model::{
        account::{AccountFilterParams, UpdateAccountDto},
        api::PageParams,
        status::{AccountCategory, AccountStatus, Visibility},
    },
    server::model::db::AccountModel,
};

/// One page of accounts along with totals for the whole filtered result
pub struct AccountPage {
    pub accounts: Vec<AccountModel>,
    pub total_items: u64,
    pub total_pages: u64,
}

pub struct AccountRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccountRepository<'a, C> {
    /// Creates a new instance of [`AccountRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, account_id: i32) -> Result<Option<AccountModel>, DbErr> {
        entity::prelude::Account::find_by_id(account_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AccountModel>, DbErr> {
        entity::prelude::Account::find()
            .filter(entity::account::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Finds the account whose clone reference points at the provided slot
    pub async fn find_by_clone(
        &self,
        device_id: &str,
        clone_number: i32,
    ) -> Result<Option<AccountModel>, DbErr> {
        entity::prelude::Account::find()
            .filter(entity::account::Column::DeviceId.eq(device_id))
            .filter(entity::account::Column::CloneNumber.eq(clone_number))
            .one(self.db)
            .await
    }

    /// Applies direct field edits to an account
    ///
    /// Returns `None` if the account does not exist. Clone placement and ownership are not
    /// editable here, see [`Self::set_clone`] and [`Self::set_owner`].
    pub async fn update_fields(
        &self,
        account_id: i32,
        update: &UpdateAccountDto,
    ) -> Result<Option<AccountModel>, DbErr> {
        let Some(account) = self.find_by_id(account_id).await? else {
            return Ok(None);
        };

        let mut account_am = account.into_active_model();
        if let Some(password) = &update.password {
            account_am.password = ActiveValue::Set(password.clone());
        }
        if let Some(email) = &update.email {
            account_am.email = ActiveValue::Set(Some(email.clone()));
        }
        if let Some(email_password) = &update.email_password {
            account_am.email_password = ActiveValue::Set(Some(email_password.clone()));
        }
        if let Some(status) = update.status {
            account_am.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(imap_status) = update.imap_status {
            account_am.imap_status = ActiveValue::Set(imap_status.as_str().to_string());
        }
        if let Some(package_name) = &update.package_name {
            account_am.package_name = ActiveValue::Set(Some(package_name.clone()));
        }
        if let Some(model) = update.model {
            account_am.model = ActiveValue::Set(Some(model.as_str().to_string()));
        }
        account_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(account_am.update(self.db).await?))
    }

    /// Points the account at a clone slot and sets its status
    pub async fn set_clone(
        &self,
        account: AccountModel,
        device_id: &str,
        clone_number: i32,
        status: AccountStatus,
    ) -> Result<AccountModel, DbErr> {
        let mut account_am = account.into_active_model();
        account_am.device_id = ActiveValue::Set(Some(device_id.to_string()));
        account_am.clone_number = ActiveValue::Set(Some(clone_number));
        account_am.status = ActiveValue::Set(status.as_str().to_string());
        account_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        account_am.update(self.db).await
    }

    /// Clears the clone reference of every account pointing at the provided slot
    ///
    /// Account status is left unchanged. Returns the number of accounts updated.
    pub async fn clear_clone(&self, device_id: &str, clone_number: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Account::update_many()
            .col_expr(
                entity::account::Column::DeviceId,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::account::Column::CloneNumber,
                Expr::value(Option::<i32>::None),
            )
            .col_expr(
                entity::account::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::account::Column::DeviceId.eq(device_id))
            .filter(entity::account::Column::CloneNumber.eq(clone_number))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Sets or clears the owner of an account
    ///
    /// Visibility is only changed when provided. Returns `None` if the account does not exist.
    pub async fn set_owner(
        &self,
        account_id: i32,
        owner_id: Option<i32>,
        visibility: Option<Visibility>,
    ) -> Result<Option<AccountModel>, DbErr> {
        let Some(account) = self.find_by_id(account_id).await? else {
            return Ok(None);
        };

        let mut account_am = account.into_active_model();
        account_am.owner_id = ActiveValue::Set(owner_id);
        if let Some(visibility) = visibility {
            account_am.visibility = ActiveValue::Set(visibility.as_str().to_string());
        }
        account_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(account_am.update(self.db).await?))
    }

    pub async fn set_category(
        &self,
        account_id: i32,
        category: AccountCategory,
    ) -> Result<Option<AccountModel>, DbErr> {
        let Some(account) = self.find_by_id(account_id).await? else {
            return Ok(None);
        };

        let mut account_am = account.into_active_model();
        account_am.category = ActiveValue::Set(category.as_str().to_string());
        account_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(account_am.update(self.db).await?))
    }

    /// Deletes an account
    ///
    /// Returns OK regardless of the account existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, account_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Account::delete_by_id(account_id)
            .exec(self.db)
            .await
    }

    /// Fetches a page of accounts matching both the `visible` condition and the filters
    ///
    /// `owner_id` restricts the result to accounts owned by that user when `filter.owned`
    /// is set.
    pub async fn page_visible(
        &self,
        visible: Condition,
        filter: &AccountFilterParams,
        owner_id: i32,
        page: &PageParams,
    ) -> Result<AccountPage, DbErr> {
        let mut query = entity::prelude::Account::find().filter(visible);

        if let Some(status) = filter.status {
            query = query.filter(entity::account::Column::Status.eq(status.as_str()));
        }
        if let Some(device_id) = &filter.device_id {
            query = query.filter(entity::account::Column::DeviceId.eq(device_id.as_str()));
        }
        if filter.owned {
            query = query.filter(entity::account::Column::OwnerId.eq(owner_id));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(entity::account::Column::Username.contains(search));
        }

        let paginator = query
            .order_by_asc(entity::account::Column::Id)
            .paginate(self.db, page.per_page());

        let totals = paginator.num_items_and_pages().await?;
        // Pages past the end are empty, the offset for them may not fit in a u64
        let accounts = if page.page < totals.number_of_pages {
            paginator.fetch_page(page.page).await?
        } else {
            Vec::new()
        };

        Ok(AccountPage {
            accounts,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    pub async fn get_many_by_owner(&self, owner_id: i32) -> Result<Vec<AccountModel>, DbErr> {
        entity::prelude::Account::find()
            .filter(entity::account::Column::OwnerId.eq(owner_id))
            .order_by_asc(entity::account::Column::Id)
            .all(self.db)
            .await
    }

    /// Counts the accounts matching `condition`
    pub async fn count(&self, condition: Condition) -> Result<u64, DbErr> {
        entity::prelude::Account::find()
            .filter(condition)
            .count(self.db)
            .await
    }

    /// Counts the accounts matching `condition` grouped by their stored status string
    pub async fn count_by_status(&self, condition: Condition) -> Result<Vec<(String, i64)>, DbErr> {
        entity::prelude::Account::find()
            .select_only()
            .column(entity::account::Column::Status)
            .column_as(entity::account::Column::Id.count(), "count")
            .filter(condition)
            .group_by(entity::account::Column::Status)
            .order_by_asc(entity::account::Column::Status)
            .into_tuple::<(String, i64)>()
            .all(self.db)
            .await
    }
}
