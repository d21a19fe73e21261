use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "device")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub status: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::device_clone::Entity")]
    DeviceClone,
}

impl Related<super::device_clone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviceClone.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
