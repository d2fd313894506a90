use super::entities::ContentAnalytics;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user_id: i64,
    pub name: String,
    pub average_score: f64,
    pub total_assessments_completed: i32,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct LeaderboardResponse {
    pub items: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct NoteAnalyticsGroup {
    pub items: Vec<ContentAnalytics>,
    pub total_views: i64,
    pub total_unique_viewers: i64,
}

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct AssessmentAnalyticsGroup {
    pub items: Vec<ContentAnalytics>,
    pub total_completions: i64,
    pub average_score: f64,
    pub average_pass_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct ResourceAnalyticsGroup {
    pub items: Vec<ContentAnalytics>,
    pub total_views: i64,
}

/// 课程内容分析，按内容类型分组
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct CourseAnalytics {
    pub course_id: i64,
    pub notes: NoteAnalyticsGroup,
    pub assessments: AssessmentAnalyticsGroup,
    pub resources: ResourceAnalyticsGroup,
}
