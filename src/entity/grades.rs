//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub assessment_id: i64,
    #[sea_orm(unique)]
    pub attempt_id: i64,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub letter_grade: Option<String>,
    pub is_final: bool,
    pub recorded_at: i64,
    pub recorded_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessment_attempts::Entity",
        from = "Column::AttemptId",
        to = "super::assessment_attempts::Column::Id"
    )]
    Attempt,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::assessment_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempt.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        crate::models::grades::entities::Grade {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            assessment_id: self.assessment_id,
            attempt_id: self.attempt_id,
            score: self.score,
            max_score: self.max_score,
            percentage: self.percentage,
            letter_grade: self.letter_grade,
            is_final: self.is_final,
            recorded_at: super::to_datetime(self.recorded_at),
            recorded_by: self.recorded_by,
        }
    }
}
