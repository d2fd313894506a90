//! 学生统计实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub total_courses_enrolled: i32,
    pub total_courses_completed: i32,
    pub total_assessments_completed: i32,
    pub total_notes_viewed: i32,
    pub total_time_spent: i64,
    pub average_score: f64,
    pub highest_score: f64,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_at: i64,
    pub version: i32,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student_stats(self) -> crate::models::stats::entities::StudentStats {
        use super::to_datetime;

        crate::models::stats::entities::StudentStats {
            user_id: self.user_id,
            total_courses_enrolled: self.total_courses_enrolled,
            total_courses_completed: self.total_courses_completed,
            total_assessments_completed: self.total_assessments_completed,
            total_notes_viewed: self.total_notes_viewed,
            total_time_spent: self.total_time_spent,
            average_score: self.average_score,
            highest_score: self.highest_score,
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_activity_at: to_datetime(self.last_activity_at),
            version: self.version,
            updated_at: to_datetime(self.updated_at),
        }
    }
}
