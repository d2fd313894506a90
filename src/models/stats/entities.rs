use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学生统计，每个学生一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct StudentStats {
    pub user_id: i64,
    pub total_courses_enrolled: i32,
    pub total_courses_completed: i32,
    pub total_assessments_completed: i32,
    pub total_notes_viewed: i32,
    // 累计学习时长（秒）
    pub total_time_spent: i64,
    pub average_score: f64,
    pub highest_score: f64,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_at: chrono::DateTime<chrono::Utc>,
    // 乐观并发版本号
    #[serde(skip)]
    #[ts(skip)]
    pub version: i32,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl StudentStats {
    /// 全零的初始统计
    pub fn empty(user_id: i64, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            user_id,
            total_courses_enrolled: 0,
            total_courses_completed: 0,
            total_assessments_completed: 0,
            total_notes_viewed: 0,
            total_time_spent: 0,
            average_score: 0.0,
            highest_score: 0.0,
            current_streak: 0,
            longest_streak: 0,
            last_activity_at: now,
            version: 0,
            updated_at: now,
        }
    }
}

// 内容类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub enum ContentType {
    Note,
    Assessment,
    Resource,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Note => "note",
            ContentType::Assessment => "assessment",
            ContentType::Resource => "resource",
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(ContentType::Note),
            "assessment" => Ok(ContentType::Assessment),
            "resource" => Ok(ContentType::Resource),
            _ => Err(format!("Invalid content type: {s}")),
        }
    }
}

/// 内容分析，每个 (content_type, content_id) 一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct ContentAnalytics {
    pub content_type: ContentType,
    pub content_id: i64,
    pub course_id: i64,
    pub total_views: i32,
    pub unique_viewers: i32,
    pub total_completions: i32,
    pub total_passed: i32,
    pub average_score: Option<f64>,
    pub pass_rate: Option<f64>,
    pub average_time_spent: Option<f64>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ContentAnalytics {
    pub fn empty(
        content_type: ContentType,
        content_id: i64,
        course_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            content_type,
            content_id,
            course_id,
            total_views: 0,
            unique_viewers: 0,
            total_completions: 0,
            total_passed: 0,
            average_score: None,
            pass_rate: None,
            average_time_spent: None,
            updated_at: now,
        }
    }
}
