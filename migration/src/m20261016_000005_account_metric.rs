use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261016_000004_account::Account;

static IDX_ACCOUNT_METRIC_ACCOUNT_ID: &str = "idx-account_metric-account_id-recorded_at";
static FK_ACCOUNT_METRIC_ACCOUNT_ID: &str = "fk-account_metric-account_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountMetric::Table)
                    .if_not_exists()
                    .col(pk_auto(AccountMetric::Id))
                    .col(integer(AccountMetric::AccountId))
                    .col(big_integer(AccountMetric::Followers))
                    .col(big_integer(AccountMetric::Following))
                    .col(big_integer(AccountMetric::Posts))
                    .col(timestamp(AccountMetric::RecordedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACCOUNT_METRIC_ACCOUNT_ID)
                    .table(AccountMetric::Table)
                    .col(AccountMetric::AccountId)
                    .col(AccountMetric::RecordedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ACCOUNT_METRIC_ACCOUNT_ID)
                    .from_tbl(AccountMetric::Table)
                    .from_col(AccountMetric::AccountId)
                    .to_tbl(Account::Table)
                    .to_col(Account::Id)
                    .on_delete(ForeignKeyAction::Cascade)
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
                    .name(FK_ACCOUNT_METRIC_ACCOUNT_ID)
                    .table(AccountMetric::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ACCOUNT_METRIC_ACCOUNT_ID)
                    .table(AccountMetric::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AccountMetric::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AccountMetric {
    Table,
    Id,
    AccountId,
    Followers,
    Following,
    Posts,
    RecordedAt,
}
