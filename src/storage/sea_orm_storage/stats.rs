use super::{SeaOrmStorage, db_err};
use crate::entity::content_analytics::{
    Column as AnalyticsColumn, Entity as ContentAnalyticsEntity,
};
use crate::entity::student_stats::{Column, Entity as StudentStatsEntity};
use crate::entity::users::Entity as Users;
use crate::errors::Result;
use crate::models::stats::{
    entities::{ContentAnalytics, ContentType, StudentStats},
    responses::LeaderboardEntry,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    /// 获取学生统计
    pub async fn get_student_stats_impl(&self, user_id: i64) -> Result<Option<StudentStats>> {
        let result = StudentStatsEntity::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err("查询学生统计失败"))?;

        Ok(result.map(|m| m.into_student_stats()))
    }

    /// 按平均分排行，包含全部统计行
    pub async fn list_leaderboard_impl(&self, limit: u64) -> Result<Vec<LeaderboardEntry>> {
        let rows = StudentStatsEntity::find()
            .order_by_desc(Column::AverageScore)
            .order_by_desc(Column::TotalAssessmentsCompleted)
            .order_by_asc(Column::UserId)
            .limit(limit)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(db_err("查询排行榜失败"))?;

        Ok(rows
            .into_iter()
            .filter_map(|(stats, user)| user.map(|u| (stats, u.into_user())))
            .enumerate()
            .map(|(index, (stats, user))| LeaderboardEntry {
                rank: index as i64 + 1,
                user_id: stats.user_id,
                name: user.full_name(),
                average_score: stats.average_score,
                total_assessments_completed: stats.total_assessments_completed,
            })
            .collect())
    }

    /// 获取单项内容的分析数据
    pub async fn get_content_analytics_impl(
        &self,
        content_type: ContentType,
        content_id: i64,
    ) -> Result<Option<ContentAnalytics>> {
        let result = ContentAnalyticsEntity::find()
            .filter(AnalyticsColumn::ContentType.eq(content_type.as_str()))
            .filter(AnalyticsColumn::ContentId.eq(content_id))
            .one(&self.db)
            .await
            .map_err(db_err("查询内容分析失败"))?;

        Ok(result.map(|m| m.into_content_analytics()))
    }

    /// 列出课程内全部内容的分析数据
    pub async fn list_course_analytics_impl(&self, course_id: i64) -> Result<Vec<ContentAnalytics>> {
        let rows = ContentAnalyticsEntity::find()
            .filter(AnalyticsColumn::CourseId.eq(course_id))
            .order_by_asc(AnalyticsColumn::ContentType)
            .order_by_asc(AnalyticsColumn::ContentId)
            .all(&self.db)
            .await
            .map_err(db_err("查询课程分析失败"))?;

        Ok(rows
            .into_iter()
            .map(|m| m.into_content_analytics())
            .collect())
    }
}
