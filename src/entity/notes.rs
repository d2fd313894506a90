//! 笔记实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub display_order: i32,
    pub is_published: bool,
    pub is_visible_to_students: bool,
    pub publish_at: Option<i64>,
    pub expires_at: Option<i64>,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_note(self) -> crate::models::notes::entities::Note {
        use super::{to_datetime, to_datetime_opt};

        crate::models::notes::entities::Note {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            content: self.content,
            display_order: self.display_order,
            is_published: self.is_published,
            is_visible_to_students: self.is_visible_to_students,
            publish_at: to_datetime_opt(self.publish_at),
            expires_at: to_datetime_opt(self.expires_at),
            created_by: self.created_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
