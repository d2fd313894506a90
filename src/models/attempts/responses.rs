use super::entities::{Attempt, AttemptStatus, QuestionResponse};
use crate::models::assessments::entities::AssessmentType;
use crate::models::users::entities::UserSummary;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct StartAttemptResponse {
    pub attempt_id: i64,
    pub attempt_number: i32,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct SubmitResponseResponse {
    pub response_id: i64,
    pub is_auto_graded: bool,
    pub is_correct: Option<bool>,
    pub points_awarded: Option<f64>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct SubmitAttemptResponse {
    pub attempt_id: i64,
    pub status: AttemptStatus,
    pub total_score: Option<f64>,
    pub percentage: Option<f64>,
    pub is_passed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct FinalizeGradingResponse {
    pub attempt_id: i64,
    pub total_score: f64,
    pub percentage: f64,
    pub is_passed: bool,
    pub letter_grade: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct AttemptDetail {
    pub attempt: Attempt,
    pub responses: Vec<QuestionResponse>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct AttemptListResponse {
    pub items: Vec<Attempt>,
}

/// 待评分条目，附带测评、学生和课程信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct PendingGradingItem {
    pub attempt: Attempt,
    pub assessment_title: String,
    pub assessment_type: AssessmentType,
    pub total_points: f64,
    pub student: UserSummary,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct PendingGradingListResponse {
    pub items: Vec<PendingGradingItem>,
}
