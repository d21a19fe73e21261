use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261016_000001_portal_user::PortalUser;

static IDX_ACCOUNT_OWNER_ID: &str = "idx-account-owner_id";
static IDX_ACCOUNT_MODEL: &str = "idx-account-model";
static IDX_ACCOUNT_CLONE_SLOT: &str = "idx-account-device_id-clone_number";
static FK_ACCOUNT_OWNER_ID: &str = "fk-account-owner_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(pk_auto(Account::Id))
                    .col(string_uniq(Account::RecordId))
                    .col(string_uniq(Account::Username))
                    .col(string(Account::Password))
                    .col(string_null(Account::Email))
                    .col(string_null(Account::EmailPassword))
                    .col(string(Account::Status))
                    .col(string(Account::ImapStatus))
                    .col(string_null(Account::DeviceId))
                    .col(integer_null(Account::CloneNumber))
                    .col(string_null(Account::PackageName))
                    .col(integer_null(Account::OwnerId))
                    .col(string(Account::Visibility))
                    .col(string_null(Account::Model))
                    .col(string(Account::Category))
                    .col(timestamp(Account::CreatedAt))
                    .col(timestamp(Account::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACCOUNT_OWNER_ID)
                    .table(Account::Table)
                    .col(Account::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACCOUNT_MODEL)
                    .table(Account::Table)
                    .col(Account::Model)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACCOUNT_CLONE_SLOT)
                    .table(Account::Table)
                    .col(Account::DeviceId)
                    .col(Account::CloneNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ACCOUNT_OWNER_ID)
                    .from_tbl(Account::Table)
                    .from_col(Account::OwnerId)
                    .to_tbl(PortalUser::Table)
                    .to_col(PortalUser::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .on_update(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ACCOUNT_OWNER_ID)
                    .table(Account::Table)
                    .to_owned(),
            )
            .await?;

        for index in [IDX_ACCOUNT_CLONE_SLOT, IDX_ACCOUNT_MODEL, IDX_ACCOUNT_OWNER_ID] {
            manager
                .drop_index(Index::drop().name(index).table(Account::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Account {
    Table,
    Id,
    RecordId,
    Username,
    Password,
    Email,
    EmailPassword,
    Status,
    ImapStatus,
    DeviceId,
    CloneNumber,
    PackageName,
    OwnerId,
    Visibility,
    Model,
    Category,
    CreatedAt,
    UpdatedAt,
}
