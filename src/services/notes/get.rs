use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoteService;
use crate::models::notes::requests::NoteListQuery;
use crate::models::notes::responses::{NoteDetail, NoteListResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_note(
    service: &NoteService,
    note_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let note = match storage.get_note_by_id(note_id).await {
        Ok(Some(note)) => note,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NoteNotFound,
                "笔记不存在",
            )));
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    match storage.count_note_views(note_id).await {
        Ok((total_views, unique_viewers)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NoteDetail {
                note,
                total_views,
                unique_viewers,
            },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn list_notes(
    service: &NoteService,
    course_id: i64,
    query: NoteListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_notes(course_id, query.include_unpublished)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NoteListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
