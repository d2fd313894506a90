use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoteService;
use crate::grading;
use crate::models::ApiResponse;
use crate::models::notes::requests::RecordNoteViewRequest;

pub async fn record_view(
    service: &NoteService,
    note_id: i64,
    body: RecordNoteViewRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::record_note_view(storage.as_ref(), note_id, body.user_id, body.duration).await {
        Ok(view) => Ok(HttpResponse::Created().json(ApiResponse::success(view, "浏览已记录"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
