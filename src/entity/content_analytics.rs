//! 内容分析实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "content_analytics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub content_type: String,
    pub content_id: i64,
    pub course_id: i64,
    pub total_views: i32,
    pub unique_viewers: i32,
    pub total_completions: i32,
    pub total_passed: i32,
    pub average_score: Option<f64>,
    pub pass_rate: Option<f64>,
    pub average_time_spent: Option<f64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_content_analytics(self) -> crate::models::stats::entities::ContentAnalytics {
        use crate::models::stats::entities::{ContentAnalytics, ContentType};

        ContentAnalytics {
            content_type: self
                .content_type
                .parse::<ContentType>()
                .unwrap_or(ContentType::Resource),
            content_id: self.content_id,
            course_id: self.course_id,
            total_views: self.total_views,
            unique_viewers: self.unique_viewers,
            total_completions: self.total_completions,
            total_passed: self.total_passed,
            average_score: self.average_score,
            pass_rate: self.pass_rate,
            average_time_spent: self.average_time_spent,
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
