use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 测评类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum AssessmentType {
    Quiz,
    Test,
    Assignment,
    Exam,
}

impl AssessmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::Quiz => "quiz",
            AssessmentType::Test => "test",
            AssessmentType::Assignment => "assignment",
            AssessmentType::Exam => "exam",
        }
    }
}

impl std::str::FromStr for AssessmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz" => Ok(AssessmentType::Quiz),
            "test" => Ok(AssessmentType::Test),
            "assignment" => Ok(AssessmentType::Assignment),
            "exam" => Ok(AssessmentType::Exam),
            _ => Err(format!("Invalid assessment type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Assessment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub assessment_type: AssessmentType,
    pub total_points: f64,
    // 及格线（百分比）
    pub passing_score: Option<f64>,
    // 限时（分钟），仅供客户端展示
    pub time_limit: Option<i32>,
    // 最大作答次数，None 表示不限
    pub max_attempts: Option<i32>,
    pub shuffle_questions: bool,
    pub show_correct_answers: bool,
    pub is_published: bool,
    pub is_visible_to_students: bool,
    pub available_from: Option<chrono::DateTime<chrono::Utc>>,
    pub available_until: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 选择题选项
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

/// 题目类型及其专属数据
///
/// 选择类题目携带选项，可自动评分；其余类型需要人工评分。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(tag = "question_type", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<QuestionOption>,
    },
    TrueFalse {
        options: Vec<QuestionOption>,
    },
    ShortAnswer {
        rubric: Option<String>,
    },
    Written {
        rubric: Option<String>,
    },
    FileUpload {
        allowed_file_types: Vec<String>,
        max_file_size: Option<i64>,
    },
}

impl QuestionKind {
    pub const MULTIPLE_CHOICE: &'static str = "multiple_choice";
    pub const TRUE_FALSE: &'static str = "true_false";
    pub const SHORT_ANSWER: &'static str = "short_answer";
    pub const WRITTEN: &'static str = "written";
    pub const FILE_UPLOAD: &'static str = "file_upload";

    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => Self::MULTIPLE_CHOICE,
            QuestionKind::TrueFalse { .. } => Self::TRUE_FALSE,
            QuestionKind::ShortAnswer { .. } => Self::SHORT_ANSWER,
            QuestionKind::Written { .. } => Self::WRITTEN,
            QuestionKind::FileUpload { .. } => Self::FILE_UPLOAD,
        }
    }

    /// 选择类题目的选项
    pub fn options(&self) -> Option<&[QuestionOption]> {
        match self {
            QuestionKind::MultipleChoice { options } | QuestionKind::TrueFalse { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn rubric(&self) -> Option<&str> {
        match self {
            QuestionKind::ShortAnswer { rubric } | QuestionKind::Written { rubric } => {
                rubric.as_deref()
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Question {
    pub id: i64,
    pub assessment_id: i64,
    pub prompt: String,
    pub explanation: Option<String>,
    pub points: f64,
    pub display_order: i32,
    pub kind: QuestionKind,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
