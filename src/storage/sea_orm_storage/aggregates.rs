//! 聚合行写入
//!
//! 学生统计以 `version` 比较并交换，内容分析以计数列比较并交换。
//! 影响行数为 0 说明已被并发修改，返回 Conflict 由上层重读重试。

use super::db_err;
use crate::entity::content_analytics::{
    ActiveModel as AnalyticsActiveModel, Column as AnalyticsColumn, Entity as ContentAnalyticsEntity,
};
use crate::entity::student_stats::{
    ActiveModel as StatsActiveModel, Column as StatsColumn, Entity as StudentStatsEntity,
};
use crate::errors::{LmsError, Result};
use crate::models::stats::entities::{ContentAnalytics, StudentStats};
use crate::storage::{AnalyticsWrite, StatsWrite};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

fn stats_values(stats: &StudentStats) -> StatsActiveModel {
    StatsActiveModel {
        total_courses_enrolled: Set(stats.total_courses_enrolled),
        total_courses_completed: Set(stats.total_courses_completed),
        total_assessments_completed: Set(stats.total_assessments_completed),
        total_notes_viewed: Set(stats.total_notes_viewed),
        total_time_spent: Set(stats.total_time_spent),
        average_score: Set(stats.average_score),
        highest_score: Set(stats.highest_score),
        current_streak: Set(stats.current_streak),
        longest_streak: Set(stats.longest_streak),
        last_activity_at: Set(stats.last_activity_at.timestamp()),
        updated_at: Set(stats.updated_at.timestamp()),
        ..Default::default()
    }
}

fn analytics_values(analytics: &ContentAnalytics) -> AnalyticsActiveModel {
    AnalyticsActiveModel {
        total_views: Set(analytics.total_views),
        unique_viewers: Set(analytics.unique_viewers),
        total_completions: Set(analytics.total_completions),
        total_passed: Set(analytics.total_passed),
        average_score: Set(analytics.average_score),
        pass_rate: Set(analytics.pass_rate),
        average_time_spent: Set(analytics.average_time_spent),
        updated_at: Set(analytics.updated_at.timestamp()),
        ..Default::default()
    }
}

/// 写入学生统计
pub(super) async fn write_stats<C: ConnectionTrait>(conn: &C, write: &StatsWrite) -> Result<()> {
    let stats = &write.stats;

    match write.expected_version {
        None => {
            let mut model = stats_values(stats);
            model.user_id = Set(stats.user_id);
            model.version = Set(0);
            // user_id 唯一，并发插入时返回 Conflict
            model
                .insert(conn)
                .await
                .map_err(db_err("创建学生统计失败"))?;
        }
        Some(expected) => {
            let mut model = stats_values(stats);
            model.version = Set(expected + 1);
            let result = StudentStatsEntity::update_many()
                .set(model)
                .filter(StatsColumn::UserId.eq(stats.user_id))
                .filter(StatsColumn::Version.eq(expected))
                .exec(conn)
                .await
                .map_err(db_err("更新学生统计失败"))?;

            if result.rows_affected == 0 {
                return Err(LmsError::conflict(format!(
                    "学生 {} 的统计已被并发修改",
                    stats.user_id
                )));
            }
        }
    }

    Ok(())
}

/// 写入内容分析
pub(super) async fn write_analytics<C: ConnectionTrait>(
    conn: &C,
    write: &AnalyticsWrite,
) -> Result<()> {
    let analytics = &write.analytics;

    match &write.previous {
        None => {
            let mut model = analytics_values(analytics);
            model.content_type = Set(analytics.content_type.as_str().to_string());
            model.content_id = Set(analytics.content_id);
            model.course_id = Set(analytics.course_id);
            model
                .insert(conn)
                .await
                .map_err(db_err("创建内容分析失败"))?;
        }
        Some(previous) => {
            let result = ContentAnalyticsEntity::update_many()
                .set(analytics_values(analytics))
                .filter(AnalyticsColumn::ContentType.eq(analytics.content_type.as_str()))
                .filter(AnalyticsColumn::ContentId.eq(analytics.content_id))
                .filter(AnalyticsColumn::TotalViews.eq(previous.total_views))
                .filter(AnalyticsColumn::TotalCompletions.eq(previous.total_completions))
                .exec(conn)
                .await
                .map_err(db_err("更新内容分析失败"))?;

            if result.rows_affected == 0 {
                return Err(LmsError::conflict(format!(
                    "{} {} 的分析数据已被并发修改",
                    analytics.content_type.as_str(),
                    analytics.content_id
                )));
            }
        }
    }

    Ok(())
}
