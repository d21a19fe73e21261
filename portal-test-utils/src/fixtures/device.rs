use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, DbErr, EntityTrait, QueryFilter};

use crate::{
    error::TestError,
    model::{CloneModel, DeviceModel},
    TestSetup,
};

impl TestSetup {
    pub fn device(&self) -> DeviceFixtures<'_> {
        DeviceFixtures { setup: self }
    }

    /// Reads the current state of a clone slot, failing if it does not exist
    pub async fn clone_at(&self, device_id: &str, clone_number: i32) -> Result<CloneModel, TestError> {
        entity::prelude::DeviceClone::find()
            .filter(entity::device_clone::Column::DeviceId.eq(device_id))
            .filter(entity::device_clone::Column::CloneNumber.eq(clone_number))
            .one(&self.state.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("clone {}/{}", device_id, clone_number)).into()
            })
    }
}

pub struct DeviceFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> DeviceFixtures<'a> {
    /// Inserts a device with the given status string
    pub async fn insert_device(&self, device_id: &str, status: &str) -> Result<DeviceModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Device::insert(entity::device::ActiveModel {
                id: ActiveValue::Set(device_id.to_string()),
                status: ActiveValue::Set(status.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    /// Inserts a clone slot, `assigned_username` does not touch any account record
    pub async fn insert_clone(
        &self,
        device_id: &str,
        clone_number: i32,
        status: &str,
        assigned_username: Option<&str>,
    ) -> Result<CloneModel, TestError> {
        Ok(
            entity::prelude::DeviceClone::insert(entity::device_clone::ActiveModel {
                device_id: ActiveValue::Set(device_id.to_string()),
                clone_number: ActiveValue::Set(clone_number),
                status: ActiveValue::Set(status.to_string()),
                health: ActiveValue::Set("Working".to_string()),
                assigned_username: ActiveValue::Set(assigned_username.map(str::to_string)),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    /// Inserts an `Available` device with `clone_count` empty `Available` clones numbered from 0
    pub async fn insert_device_with_clones(
        &self,
        device_id: &str,
        clone_count: i32,
    ) -> Result<(DeviceModel, Vec<CloneModel>), TestError> {
        let device = self.insert_device(device_id, "Available").await?;

        let mut clones = Vec::with_capacity(clone_count.max(0) as usize);
        for clone_number in 0..clone_count {
            clones.push(
                self.insert_clone(device_id, clone_number, "Available", None)
                    .await?,
            );
        }

        Ok((device, clones))
    }
}
