use super::entities::{AccessAction, ResourceType};
use serde::Deserialize;
use ts_rs::TS;

// 新建资源默认未发布且对学生不可见
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/resource.ts")]
pub struct CreateResourceRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub resource_type: ResourceType,
    pub url: String,
    pub category: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    pub created_by: i64,
    pub available_from: Option<chrono::DateTime<chrono::Utc>>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/resource.ts")]
pub struct UpdateResourceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub display_order: Option<i32>,
    pub available_from: Option<chrono::DateTime<chrono::Utc>>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/resource.ts")]
pub struct ResourceVisibilityRequest {
    pub is_published: bool,
    pub is_visible_to_students: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/resource.ts")]
pub struct ResourceListQuery {
    #[serde(default)]
    pub include_unpublished: bool,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/resource.ts")]
pub struct RecordResourceAccessRequest {
    pub user_id: i64,
    #[serde(default)]
    pub action: AccessAction,
}
