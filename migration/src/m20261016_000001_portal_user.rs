use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PortalUser::Table)
                    .if_not_exists()
                    .col(pk_auto(PortalUser::Id))
                    .col(string_uniq(PortalUser::Email))
                    .col(string(PortalUser::PasswordHash))
                    .col(string(PortalUser::Role))
                    .col(timestamp(PortalUser::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortalUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PortalUser {
    Table,
    Id,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
}
