use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 作答状态
///
/// `in_progress -> submitted -> grading -> graded`，全部可自动评分时
/// 直接 `in_progress -> graded`。`grading` 表示已被某位导师认领。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub enum AttemptStatus {
    InProgress,
    Submitted,
    Grading,
    Graded,
}

impl AttemptStatus {
    pub const IN_PROGRESS: &'static str = "in_progress";
    pub const SUBMITTED: &'static str = "submitted";
    pub const GRADING: &'static str = "grading";
    pub const GRADED: &'static str = "graded";

    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::InProgress => Self::IN_PROGRESS,
            AttemptStatus::Submitted => Self::SUBMITTED,
            AttemptStatus::Grading => Self::GRADING,
            AttemptStatus::Graded => Self::GRADED,
        }
    }

    /// 等待人工评分（含已认领）
    pub fn is_pending_grading(&self) -> bool {
        matches!(self, AttemptStatus::Submitted | AttemptStatus::Grading)
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttemptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::IN_PROGRESS => Ok(AttemptStatus::InProgress),
            Self::SUBMITTED => Ok(AttemptStatus::Submitted),
            Self::GRADING => Ok(AttemptStatus::Grading),
            Self::GRADED => Ok(AttemptStatus::Graded),
            _ => Err(format!("Invalid attempt status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct Attempt {
    pub id: i64,
    pub assessment_id: i64,
    pub user_id: i64,
    pub attempt_number: i32,
    pub status: AttemptStatus,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub total_score: Option<f64>,
    pub percentage: Option<f64>,
    pub is_passed: Option<bool>,
    // 认领评分的导师
    pub claimed_by: Option<i64>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub feedback: Option<String>,
}

/// 学生提交的答案
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub enum AnswerPayload {
    SelectedOption { option_id: String },
    Text { text: String },
    File { file_ref: String },
}

impl AnswerPayload {
    pub fn selected_option(&self) -> Option<&str> {
        match self {
            AnswerPayload::SelectedOption { option_id } => Some(option_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct QuestionResponse {
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    pub answer: AnswerPayload,
    pub is_auto_graded: bool,
    pub is_correct: Option<bool>,
    pub points_awarded: Option<f64>,
    pub feedback: Option<String>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}
