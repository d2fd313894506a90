//! 测评实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub assessment_type: String,
    pub total_points: f64,
    pub passing_score: Option<f64>,
    pub time_limit: Option<i32>,
    pub max_attempts: Option<i32>,
    pub shuffle_questions: bool,
    pub show_correct_answers: bool,
    pub is_published: bool,
    pub is_visible_to_students: bool,
    pub available_from: Option<i64>,
    pub available_until: Option<i64>,
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
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        use super::{to_datetime, to_datetime_opt};
        use crate::models::assessments::entities::{Assessment, AssessmentType};

        Assessment {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            assessment_type: self
                .assessment_type
                .parse::<AssessmentType>()
                .unwrap_or(AssessmentType::Quiz),
            total_points: self.total_points,
            passing_score: self.passing_score,
            time_limit: self.time_limit,
            max_attempts: self.max_attempts,
            shuffle_questions: self.shuffle_questions,
            show_correct_answers: self.show_correct_answers,
            is_published: self.is_published,
            is_visible_to_students: self.is_visible_to_students,
            available_from: to_datetime_opt(self.available_from),
            available_until: to_datetime_opt(self.available_until),
            created_by: self.created_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
