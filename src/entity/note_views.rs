//! 笔记浏览记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "note_views")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub note_id: i64,
    pub user_id: i64,
    pub viewed_at: i64,
    pub duration: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::notes::Entity",
        from = "Column::NoteId",
        to = "super::notes::Column::Id"
    )]
    Note,
}

impl Related<super::notes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Note.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_note_view(self) -> crate::models::notes::entities::NoteView {
        crate::models::notes::entities::NoteView {
            id: self.id,
            note_id: self.note_id,
            user_id: self.user_id,
            viewed_at: super::to_datetime(self.viewed_at),
            duration: self.duration,
        }
    }
}
