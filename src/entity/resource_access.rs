//! 资源访问记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resource_access")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub resource_id: i64,
    pub user_id: i64,
    pub action: String,
    pub accessed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::resources::Entity",
        from = "Column::ResourceId",
        to = "super::resources::Column::Id"
    )]
    Resource,
}

impl Related<super::resources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resource.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_resource_access(self) -> crate::models::resources::entities::ResourceAccess {
        use crate::models::resources::entities::{AccessAction, ResourceAccess};

        ResourceAccess {
            id: self.id,
            resource_id: self.resource_id,
            user_id: self.user_id,
            action: self.action.parse().unwrap_or(AccessAction::View),
            accessed_at: super::to_datetime(self.accessed_at),
        }
    }
}
