use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261016_000002_device::Device;

static IDX_DEVICE_CLONE_SLOT: &str = "idx-device_clone-device_id-clone_number";
static FK_DEVICE_CLONE_DEVICE_ID: &str = "fk-device_clone-device_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeviceClone::Table)
                    .if_not_exists()
                    .col(pk_auto(DeviceClone::Id))
                    .col(string(DeviceClone::DeviceId))
                    .col(integer(DeviceClone::CloneNumber))
                    .col(string(DeviceClone::Status))
                    .col(string(DeviceClone::Health))
                    // Nullable unique: an account username can occupy at most one clone
                    .col(string_null(DeviceClone::AssignedUsername).unique_key())
                    .col(timestamp(DeviceClone::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DEVICE_CLONE_SLOT)
                    .table(DeviceClone::Table)
                    .col(DeviceClone::DeviceId)
                    .col(DeviceClone::CloneNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DEVICE_CLONE_DEVICE_ID)
                    .from_tbl(DeviceClone::Table)
                    .from_col(DeviceClone::DeviceId)
                    .to_tbl(Device::Table)
                    .to_col(Device::Id)
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
                    .name(FK_DEVICE_CLONE_DEVICE_ID)
                    .table(DeviceClone::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DEVICE_CLONE_SLOT)
                    .table(DeviceClone::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DeviceClone::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DeviceClone {
    Table,
    Id,
    DeviceId,
    CloneNumber,
    Status,
    Health,
    AssignedUsername,
    UpdatedAt,
}
