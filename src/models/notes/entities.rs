use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct Note {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    // Markdown 正文
    pub content: String,
    pub display_order: i32,
    pub is_published: bool,
    pub is_visible_to_students: bool,
    pub publish_at: Option<chrono::DateTime<chrono::Utc>>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct NoteView {
    pub id: i64,
    pub note_id: i64,
    pub user_id: i64,
    pub viewed_at: chrono::DateTime<chrono::Utc>,
    // 阅读时长（秒）
    pub duration: Option<i64>,
}
