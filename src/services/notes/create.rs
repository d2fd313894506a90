use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NoteService;
use crate::models::{ApiResponse, ErrorCode, notes::requests::CreateNoteRequest};

pub async fn create_note(
    service: &NoteService,
    note: CreateNoteRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if note.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "笔记标题不能为空",
        )));
    }
    if let (Some(publish), Some(expires)) = (note.publish_at, note.expires_at)
        && publish > expires
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "发布时间不能晚于过期时间",
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_course_by_id(note.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "课程不存在",
            )));
        }
        Err(e) => return Ok(e.to_http_response()),
    }

    match storage.get_user_by_id(note.created_by).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "创建人不存在",
            )));
        }
        Err(e) => return Ok(e.to_http_response()),
    }

    match storage.create_note(note).await {
        Ok(note) => {
            info!("课程 {} 新增笔记 {} ({})", note.course_id, note.id, note.title);
            Ok(HttpResponse::Created().json(ApiResponse::success(note, "笔记创建成功")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
