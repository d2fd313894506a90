//! 作答记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessment_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    pub user_id: i64,
    pub attempt_number: i32,
    pub status: String,
    pub started_at: i64,
    pub submitted_at: Option<i64>,
    pub total_score: Option<f64>,
    pub percentage: Option<f64>,
    pub is_passed: Option<bool>,
    pub claimed_by: Option<i64>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attempt(self) -> crate::models::attempts::entities::Attempt {
        use super::{to_datetime, to_datetime_opt};
        use crate::models::attempts::entities::{Attempt, AttemptStatus};

        Attempt {
            id: self.id,
            assessment_id: self.assessment_id,
            user_id: self.user_id,
            attempt_number: self.attempt_number,
            status: self
                .status
                .parse::<AttemptStatus>()
                .unwrap_or(AttemptStatus::InProgress),
            started_at: to_datetime(self.started_at),
            submitted_at: to_datetime_opt(self.submitted_at),
            total_score: self.total_score,
            percentage: self.percentage,
            is_passed: self.is_passed,
            claimed_by: self.claimed_by,
            graded_by: self.graded_by,
            graded_at: to_datetime_opt(self.graded_at),
            feedback: self.feedback,
        }
    }
}
