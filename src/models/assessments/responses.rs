use super::entities::{Assessment, Question};
use serde::Serialize;
use ts_rs::TS;

// 测评详情（附带按顺序排列的题目）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentDetail {
    pub assessment: Assessment,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListResponse {
    pub items: Vec<Assessment>,
}

/// 测评统计
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentStats {
    pub assessment_id: i64,
    pub total_attempts: i64,
    pub completed_attempts: i64,
    pub pending_grading: i64,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub pass_rate: f64,
    pub passing_score: Option<f64>,
}
