use super::entities::{AssessmentType, QuestionKind};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CreateAssessmentRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub assessment_type: AssessmentType,
    pub total_points: f64,
    pub passing_score: Option<f64>,
    pub time_limit: Option<i32>,
    pub max_attempts: Option<i32>,
    #[serde(default)]
    pub shuffle_questions: bool,
    #[serde(default)]
    pub show_correct_answers: bool,
    pub available_from: Option<chrono::DateTime<chrono::Utc>>,
    pub available_until: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: i64,
}

// 更新测评请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct UpdateAssessmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assessment_type: Option<AssessmentType>,
    pub total_points: Option<f64>,
    pub passing_score: Option<f64>,
    pub time_limit: Option<i32>,
    pub max_attempts: Option<i32>,
    pub shuffle_questions: Option<bool>,
    pub show_correct_answers: Option<bool>,
    pub available_from: Option<chrono::DateTime<chrono::Utc>>,
    pub available_until: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentVisibilityRequest {
    pub is_published: bool,
    pub is_visible_to_students: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListQuery {
    #[serde(default)]
    pub include_unpublished: bool,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CreateQuestionRequest {
    pub prompt: String,
    pub explanation: Option<String>,
    pub points: f64,
    pub display_order: i32,
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct UpdateQuestionRequest {
    pub prompt: Option<String>,
    pub explanation: Option<String>,
    pub points: Option<f64>,
    pub display_order: Option<i32>,
    pub kind: Option<QuestionKind>,
}
