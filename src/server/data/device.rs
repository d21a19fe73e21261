use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::{api::PageParams, status::DeviceStatus},
    server::model::db::DeviceModel,
};

pub struct DeviceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DeviceRepository<'a, C> {
    /// Creates a new instance of [`DeviceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, device_id: &str) -> Result<Option<DeviceModel>, DbErr> {
        entity::prelude::Device::find_by_id(device_id.to_string())
            .one(self.db)
            .await
    }

    /// Creates the device or updates the status of an existing one
    pub async fn upsert(
        &self,
        device_id: &str,
        status: DeviceStatus,
    ) -> Result<DeviceModel, DbErr> {
        let now = Utc::now().naive_utc();

        match self.find_by_id(device_id).await? {
            Some(device) => {
                let mut device_am = device.into_active_model();
                device_am.status = ActiveValue::Set(status.as_str().to_string());
                device_am.updated_at = ActiveValue::Set(now);

                device_am.update(self.db).await
            }
            None => {
                let device = entity::device::ActiveModel {
                    id: ActiveValue::Set(device_id.to_string()),
                    status: ActiveValue::Set(status.as_str().to_string()),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                };

                device.insert(self.db).await
            }
        }
    }

    /// Fetches a page of devices ordered by ID, optionally filtered by status
    ///
    /// Returns the devices along with the total item and page counts.
    pub async fn page(
        &self,
        status: Option<DeviceStatus>,
        page: &PageParams,
    ) -> Result<(Vec<DeviceModel>, u64, u64), DbErr> {
        let mut query = entity::prelude::Device::find();
        if let Some(status) = status {
            query = query.filter(entity::device::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_asc(entity::device::Column::Id)
            .paginate(self.db, page.per_page());

        let totals = paginator.num_items_and_pages().await?;
        // Pages past the end are empty, the offset for them may not fit in a u64
        let devices = if page.page < totals.number_of_pages {
            paginator.fetch_page(page.page).await?
        } else {
            Vec::new()
        };

        Ok((devices, totals.number_of_items, totals.number_of_pages))
    }
}
