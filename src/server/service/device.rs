use std::collections::HashMap;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::{PageDto, PageParams},
        device::{CloneDto, DeviceDto, DeviceSummaryDto, UpdateCloneDto, UpsertDeviceDto},
        status::{CloneHealth, CloneStatus, DeviceStatus},
    },
    server::{
        data::{device::DeviceRepository, device_clone::CloneRepository},
        error::{request::RequestError, Error},
        model::db::{CloneModel, DeviceModel},
        service::retry::RetryContext,
    },
};

/// Largest number of clone slots that can be provisioned on a device
pub const MAX_CLONES_PER_DEVICE: i32 = 64;

impl TryFrom<CloneModel> for CloneDto {
    type Error = Error;

    fn try_from(clone: CloneModel) -> Result<Self, Self::Error> {
        let status: CloneStatus = clone.status.parse()?;

        Ok(Self {
            clone_number: clone.clone_number,
            status,
            status_class: status.display_class().to_string(),
            health: clone.health.parse::<CloneHealth>()?,
            assigned_username: clone.assigned_username,
            updated_at: clone.updated_at,
        })
    }
}

fn device_dto(device: DeviceModel, clones: Vec<CloneModel>) -> Result<DeviceDto, Error> {
    let status: DeviceStatus = device.status.parse()?;

    Ok(DeviceDto {
        id: device.id,
        status,
        status_class: status.display_class().to_string(),
        clones: clones
            .into_iter()
            .map(CloneDto::try_from)
            .collect::<Result<_, _>>()?,
        updated_at: device.updated_at,
    })
}

pub struct DeviceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DeviceService<'a> {
    /// Creates a new instance of [`DeviceService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists devices with their clone and occupied clone counts
    pub async fn get_page(
        &self,
        status: Option<DeviceStatus>,
        page: PageParams,
    ) -> Result<PageDto<DeviceSummaryDto>, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();

        let (devices, clones, total_items, total_pages) = ctx
            .execute_with_retry("list devices", || {
                let db = db.clone();

                Box::pin(async move {
                    let (devices, total_items, total_pages) =
                        DeviceRepository::new(&db).page(status, &page).await?;

                    let device_ids: Vec<String> =
                        devices.iter().map(|device| device.id.clone()).collect();
                    let clones = CloneRepository::new(&db)
                        .get_many_by_devices(&device_ids)
                        .await?;

                    Ok((devices, clones, total_items, total_pages))
                })
            })
            .await?;

        let mut counts: HashMap<String, (u64, u64)> = HashMap::new();
        for clone in &clones {
            let entry = counts.entry(clone.device_id.clone()).or_default();
            entry.0 += 1;
            if clone.assigned_username.is_some() {
                entry.1 += 1;
            }
        }

        let items = devices
            .into_iter()
            .map(|device| -> Result<DeviceSummaryDto, Error> {
                let status: DeviceStatus = device.status.parse()?;
                let (clone_count, occupied_clones) =
                    counts.get(&device.id).copied().unwrap_or_default();

                Ok(DeviceSummaryDto {
                    id: device.id,
                    status,
                    status_class: status.display_class().to_string(),
                    clone_count,
                    occupied_clones,
                    updated_at: device.updated_at,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageDto {
            items,
            page: page.page,
            per_page: page.per_page(),
            total_items,
            total_pages,
        })
    }

    /// Gets a device with all of its clone slots
    pub async fn get_device(&self, device_id: &str) -> Result<Option<DeviceDto>, Error> {
        let Some(device) = DeviceRepository::new(self.db).find_by_id(device_id).await? else {
            return Ok(None);
        };

        let clones = CloneRepository::new(self.db)
            .get_many_by_device(device_id)
            .await?;

        Ok(Some(device_dto(device, clones)?))
    }

    /// Creates or updates a device and makes sure clone slots `0..clone_count` exist
    ///
    /// Existing slots are never removed or modified.
    pub async fn upsert_device(
        &self,
        device_id: &str,
        upsert: UpsertDeviceDto,
    ) -> Result<DeviceDto, Error> {
        if device_id.trim().is_empty() {
            return Err(RequestError::Validation("device id must not be empty".to_string()).into());
        }
        if !(0..=MAX_CLONES_PER_DEVICE).contains(&upsert.clone_count) {
            return Err(RequestError::Validation(format!(
                "clone_count must be between 0 and {}",
                MAX_CLONES_PER_DEVICE
            ))
            .into());
        }

        let txn = self.db.begin().await?;

        let device = DeviceRepository::new(&txn)
            .upsert(device_id, upsert.status)
            .await?;

        let clone_repo = CloneRepository::new(&txn);
        for clone_number in 0..upsert.clone_count {
            clone_repo.ensure_exists(device_id, clone_number).await?;
        }
        let clones = clone_repo.get_many_by_device(device_id).await?;

        txn.commit().await?;

        tracing::info!(
            device_id = %device_id,
            status = %upsert.status,
            clone_count = upsert.clone_count,
            "Upserted device"
        );

        device_dto(device, clones)
    }

    /// Updates the status and/or health of a clone slot
    ///
    /// Placing and removing accounts goes through the assignment operations, so the status
    /// change must keep the slot consistent with whether it holds an account: an occupied
    /// slot cannot become `Available` or `Broken`, an empty slot can only be `Available` or
    /// `Broken`.
    pub async fn update_clone(
        &self,
        device_id: &str,
        clone_number: i32,
        update: UpdateCloneDto,
    ) -> Result<Option<CloneDto>, Error> {
        if update.status.is_none() && update.health.is_none() {
            return Err(RequestError::Validation("No fields to update".to_string()).into());
        }

        let txn = self.db.begin().await?;

        let clone_repo = CloneRepository::new(&txn);
        let Some(clone) = clone_repo.find(device_id, clone_number).await? else {
            txn.rollback().await?;
            return Ok(None);
        };

        if let Some(status) = update.status {
            match (&clone.assigned_username, status.holds_assignment()) {
                (Some(username), false) => {
                    txn.rollback().await?;
                    return Err(RequestError::Conflict(format!(
                        "Clone {}/{} holds {}, unassign it before setting status {}",
                        device_id, clone_number, username, status
                    ))
                    .into());
                }
                (None, true) => {
                    txn.rollback().await?;
                    return Err(RequestError::Validation(format!(
                        "Status {} requires an assigned account, assign one to the clone first",
                        status
                    ))
                    .into());
                }
                _ => {}
            }
        }

        let clone = clone_repo
            .update_state(device_id, clone_number, update.status, update.health)
            .await?;

        txn.commit().await?;

        clone.map(CloneDto::try_from).transpose()
    }
}
