use super::entities::AnswerPayload;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct StartAttemptRequest {
    pub assessment_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct SubmitResponseRequest {
    pub question_id: i64,
    pub answer: AnswerPayload,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct AttemptListQuery {
    pub assessment_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct GradeResponseRequest {
    pub points_awarded: f64,
    pub feedback: Option<String>,
    pub grader_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct FinalizeGradingRequest {
    pub feedback: Option<String>,
    pub grader_id: i64,
}

// 认领/释放评分
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct GradingClaimRequest {
    pub grader_id: i64,
}
