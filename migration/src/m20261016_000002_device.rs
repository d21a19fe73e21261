use sea_orm_migration::{prelude::*, schema::*};

static IDX_DEVICE_STATUS: &str = "idx-device-status";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Device::Table)
                    .if_not_exists()
                    .col(string(Device::Id).primary_key())
                    .col(string(Device::Status))
                    .col(timestamp(Device::CreatedAt))
                    .col(timestamp(Device::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DEVICE_STATUS)
                    .table(Device::Table)
                    .col(Device::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DEVICE_STATUS)
                    .table(Device::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Device::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Device {
    Table,
    Id,
    Status,
    CreatedAt,
    UpdatedAt,
}
