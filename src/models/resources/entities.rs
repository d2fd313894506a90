use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 资源类型，资源均以链接形式存储
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/resource.ts")]
pub enum ResourceType {
    Link,
    Video,
    Document,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Link => "link",
            ResourceType::Video => "video",
            ResourceType::Document => "document",
        }
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "link" => Ok(ResourceType::Link),
            "video" => Ok(ResourceType::Video),
            "document" => Ok(ResourceType::Document),
            _ => Err(format!("Invalid resource type: {s}")),
        }
    }
}

// 访问方式，缺省为浏览
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/resource.ts")]
pub enum AccessAction {
    #[default]
    View,
    Download,
}

impl AccessAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessAction::View => "view",
            AccessAction::Download => "download",
        }
    }
}

impl std::str::FromStr for AccessAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(AccessAction::View),
            "download" => Ok(AccessAction::Download),
            _ => Err(format!("Invalid access action: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/resource.ts")]
pub struct Resource {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub resource_type: ResourceType,
    pub url: String,
    pub category: Option<String>,
    pub display_order: i32,
    pub is_published: bool,
    pub is_visible_to_students: bool,
    pub available_from: Option<chrono::DateTime<chrono::Utc>>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/resource.ts")]
pub struct ResourceAccess {
    pub id: i64,
    pub resource_id: i64,
    pub user_id: i64,
    pub action: AccessAction,
    pub accessed_at: chrono::DateTime<chrono::Utc>,
}
