use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub record_id: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub email_password: Option<String>,
    pub status: String,
    pub imap_status: String,
    pub device_id: Option<String>,
    pub clone_number: Option<i32>,
    pub package_name: Option<String>,
    pub owner_id: Option<i32>,
    pub visibility: String,
    pub model: Option<String>,
    pub category: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::portal_user::Entity",
        from = "Column::OwnerId",
        to = "super::portal_user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    PortalUser,
    #[sea_orm(has_many = "super::account_metric::Entity")]
    AccountMetric,
}

impl Related<super::portal_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortalUser.def()
    }
}

impl Related<super::account_metric::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountMetric.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
