use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NoteService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_note(
    service: &NoteService,
    note_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_note(note_id).await {
        Ok(true) => {
            info!("删除笔记 {note_id}");
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("笔记已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NoteNotFound,
            "笔记不存在",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
