//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! 时间统一以秒级 Unix 时间戳存储，Storage 层负责与 `DateTime<Utc>` 互转。

pub mod prelude;

pub mod assessment_attempts;
pub mod assessments;
pub mod content_analytics;
pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod note_views;
pub mod notes;
pub mod question_responses;
pub mod questions;
pub mod resource_access;
pub mod resources;
pub mod student_stats;
pub mod users;

use chrono::{DateTime, Utc};

pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub(crate) fn to_datetime_opt(ts: Option<i64>) -> Option<DateTime<Utc>> {
    ts.map(to_datetime)
}
