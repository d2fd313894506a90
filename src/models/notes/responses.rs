use super::entities::Note;
use serde::Serialize;
use ts_rs::TS;

// 笔记详情（附带浏览统计）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct NoteDetail {
    pub note: Note,
    pub total_views: i64,
    pub unique_viewers: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct NoteListResponse {
    pub items: Vec<Note>,
}
