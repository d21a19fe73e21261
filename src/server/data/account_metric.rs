use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{model::account::RecordMetricDto, server::model::db::AccountMetricModel};

pub struct AccountMetricRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccountMetricRepository<'a, C> {
    /// Creates a new instance of [`AccountMetricRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a metric sample for an account at the current time
    pub async fn record(
        &self,
        account_id: i32,
        sample: &RecordMetricDto,
    ) -> Result<AccountMetricModel, DbErr> {
        let metric = entity::account_metric::ActiveModel {
            account_id: ActiveValue::Set(account_id),
            followers: ActiveValue::Set(sample.followers),
            following: ActiveValue::Set(sample.following),
            posts: ActiveValue::Set(sample.posts),
            recorded_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        metric.insert(self.db).await
    }

    /// Gets the samples of an account recorded at or after `since`, oldest first
    pub async fn get_since(
        &self,
        account_id: i32,
        since: NaiveDateTime,
    ) -> Result<Vec<AccountMetricModel>, DbErr> {
        entity::prelude::AccountMetric::find()
            .filter(entity::account_metric::Column::AccountId.eq(account_id))
            .filter(entity::account_metric::Column::RecordedAt.gte(since))
            .order_by_asc(entity::account_metric::Column::RecordedAt)
            .all(self.db)
            .await
    }
}
