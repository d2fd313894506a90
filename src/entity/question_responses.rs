//! 题目作答实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "question_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    pub selected_option_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub text_response: Option<String>,
    pub file_ref: Option<String>,
    pub is_auto_graded: bool,
    pub is_correct: Option<bool>,
    pub points_awarded: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<i64>,
    pub answered_at: i64,
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
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
}

impl Related<super::assessment_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempt.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_response(self) -> crate::models::attempts::entities::QuestionResponse {
        use super::{to_datetime, to_datetime_opt};
        use crate::models::attempts::entities::{AnswerPayload, QuestionResponse};

        // 三列中至多一列有值
        let answer = if let Some(option_id) = self.selected_option_id {
            AnswerPayload::SelectedOption { option_id }
        } else if let Some(file_ref) = self.file_ref {
            AnswerPayload::File { file_ref }
        } else {
            AnswerPayload::Text {
                text: self.text_response.unwrap_or_default(),
            }
        };

        QuestionResponse {
            id: self.id,
            attempt_id: self.attempt_id,
            question_id: self.question_id,
            answer,
            is_auto_graded: self.is_auto_graded,
            is_correct: self.is_correct,
            points_awarded: self.points_awarded,
            feedback: self.feedback,
            graded_by: self.graded_by,
            graded_at: to_datetime_opt(self.graded_at),
            answered_at: to_datetime(self.answered_at),
        }
    }
}
