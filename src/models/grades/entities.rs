use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 成绩快照，作答进入 graded 后写入，之后不再修改
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub assessment_id: i64,
    pub attempt_id: i64,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub letter_grade: Option<String>,
    pub is_final: bool,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
    // 自动评分时为空
    pub recorded_by: Option<i64>,
}
