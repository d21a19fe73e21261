pub use sea_orm_migration::prelude::*;

mod m20261016_000001_portal_user;
mod m20261016_000002_device;
mod m20261016_000003_device_clone;
mod m20261016_000004_account;
mod m20261016_000005_account_metric;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_portal_user::Migration),
            Box::new(m20261016_000002_device::Migration),
            Box::new(m20261016_000003_device_clone::Migration),
            Box::new(m20261016_000004_account::Migration),
            Box::new(m20261016_000005_account_metric::Migration),
        ]
    }
}
