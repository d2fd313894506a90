use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NoteService;
use crate::models::notes::requests::{NoteVisibilityRequest, UpdateNoteRequest};
use crate::models::{ApiResponse, ErrorCode};

fn note_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::NoteNotFound,
        "笔记不存在",
    ))
}

pub async fn update_note(
    service: &NoteService,
    note_id: i64,
    update: UpdateNoteRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "笔记标题不能为空",
        )));
    }

    let storage = service.get_storage(request);

    match storage.update_note(note_id, update).await {
        Ok(Some(note)) => Ok(HttpResponse::Ok().json(ApiResponse::success(note, "笔记更新成功"))),
        Ok(None) => Ok(note_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn set_visibility(
    service: &NoteService,
    note_id: i64,
    body: NoteVisibilityRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .set_note_visibility(note_id, body.is_published, body.is_visible_to_students)
        .await
    {
        Ok(Some(note)) => {
            info!(
                "笔记 {note_id} 可见性: published={} visible={}",
                note.is_published, note.is_visible_to_students
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(note, "笔记可见性已更新")))
        }
        Ok(None) => Ok(note_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}
