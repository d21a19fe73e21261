use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::{
    model::status::{CloneHealth, CloneStatus},
    server::model::db::CloneModel,
};

pub struct CloneRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CloneRepository<'a, C> {
    /// Creates a new instance of [`CloneRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    fn slot(device_id: &str, clone_number: i32) -> Condition {
        Condition::all()
            .add(entity::device_clone::Column::DeviceId.eq(device_id))
            .add(entity::device_clone::Column::CloneNumber.eq(clone_number))
    }

    pub async fn find(
        &self,
        device_id: &str,
        clone_number: i32,
    ) -> Result<Option<CloneModel>, DbErr> {
        entity::prelude::DeviceClone::find()
            .filter(Self::slot(device_id, clone_number))
            .one(self.db)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<CloneModel>, DbErr> {
        entity::prelude::DeviceClone::find()
            .filter(entity::device_clone::Column::AssignedUsername.eq(username))
            .one(self.db)
            .await
    }

    /// Gets the clones of a device ordered by clone number
    pub async fn get_many_by_device(&self, device_id: &str) -> Result<Vec<CloneModel>, DbErr> {
        entity::prelude::DeviceClone::find()
            .filter(entity::device_clone::Column::DeviceId.eq(device_id))
            .order_by_asc(entity::device_clone::Column::CloneNumber)
            .all(self.db)
            .await
    }

    /// Gets the clones of several devices ordered by device then clone number
    pub async fn get_many_by_devices(
        &self,
        device_ids: &[String],
    ) -> Result<Vec<CloneModel>, DbErr> {
        if device_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::DeviceClone::find()
            .filter(entity::device_clone::Column::DeviceId.is_in(device_ids.iter().cloned()))
            .order_by_asc(entity::device_clone::Column::DeviceId)
            .order_by_asc(entity::device_clone::Column::CloneNumber)
            .all(self.db)
            .await
    }

    /// Returns the clone slot, creating it as an empty `Available` slot if missing
    ///
    /// Concurrent creation of the same slot fails with a unique constraint violation on the
    /// losing side.
    pub async fn ensure_exists(
        &self,
        device_id: &str,
        clone_number: i32,
    ) -> Result<CloneModel, DbErr> {
        if let Some(clone) = self.find(device_id, clone_number).await? {
            return Ok(clone);
        }

        let clone = entity::device_clone::ActiveModel {
            device_id: ActiveValue::Set(device_id.to_string()),
            clone_number: ActiveValue::Set(clone_number),
            status: ActiveValue::Set(CloneStatus::Available.as_str().to_string()),
            health: ActiveValue::Set(CloneHealth::Unknown.as_str().to_string()),
            assigned_username: ActiveValue::Set(None),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        clone.insert(self.db).await
    }

    /// Atomically places `username` in the clone slot
    ///
    /// The write only applies if the slot is empty and `Available`, or already holds
    /// `username`. Returns `false` when another account holds the slot or the slot is not
    /// available, in which case nothing was written.
    pub async fn try_claim(
        &self,
        device_id: &str,
        clone_number: i32,
        username: &str,
        status: CloneStatus,
    ) -> Result<bool, DbErr> {
        let claimable = Condition::any()
            .add(
                Condition::all()
                    .add(entity::device_clone::Column::AssignedUsername.is_null())
                    .add(
                        entity::device_clone::Column::Status.eq(CloneStatus::Available.as_str()),
                    ),
            )
            .add(entity::device_clone::Column::AssignedUsername.eq(username));

        let result = entity::prelude::DeviceClone::update_many()
            .col_expr(
                entity::device_clone::Column::AssignedUsername,
                Expr::value(Some(username.to_string())),
            )
            .col_expr(
                entity::device_clone::Column::Status,
                Expr::value(status.as_str()),
            )
            .col_expr(
                entity::device_clone::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(Self::slot(device_id, clone_number))
            .filter(claimable)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Empties the clone slot if it still holds `username`
    ///
    /// Returns `false` if the slot held another account or nothing, in which case nothing
    /// was written.
    pub async fn release(
        &self,
        device_id: &str,
        clone_number: i32,
        username: &str,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::DeviceClone::update_many()
            .col_expr(
                entity::device_clone::Column::AssignedUsername,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::device_clone::Column::Status,
                Expr::value(CloneStatus::Available.as_str()),
            )
            .col_expr(
                entity::device_clone::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(Self::slot(device_id, clone_number))
            .filter(entity::device_clone::Column::AssignedUsername.eq(username))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Updates the status and/or health of a clone slot
    ///
    /// Returns `None` if the slot does not exist.
    pub async fn update_state(
        &self,
        device_id: &str,
        clone_number: i32,
        status: Option<CloneStatus>,
        health: Option<CloneHealth>,
    ) -> Result<Option<CloneModel>, DbErr> {
        let Some(clone) = self.find(device_id, clone_number).await? else {
            return Ok(None);
        };

        let mut clone_am = clone.into_active_model();
        if let Some(status) = status {
            clone_am.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(health) = health {
            clone_am.health = ActiveValue::Set(health.as_str().to_string());
        }
        clone_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(clone_am.update(self.db).await?))
    }
}
