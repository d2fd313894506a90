use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::notes::requests::{
    CreateNoteRequest, NoteListQuery, NoteVisibilityRequest, RecordNoteViewRequest,
    UpdateNoteRequest,
};
use crate::services::NoteService;

// 懒加载的全局 NoteService 实例
static NOTE_SERVICE: Lazy<NoteService> = Lazy::new(NoteService::new_lazy);

pub async fn create_note(
    req: HttpRequest,
    body: web::Json<CreateNoteRequest>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.create_note(body.into_inner(), &req).await
}

pub async fn get_note(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.get_note(path.into_inner(), &req).await
}

// 课程笔记列表，挂在 /courses/{id}/notes 下
pub async fn list_notes(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<NoteListQuery>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE
        .list_notes(path.into_inner(), query.into_inner(), &req)
        .await
}

pub async fn update_note(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateNoteRequest>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE
        .update_note(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn set_visibility(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<NoteVisibilityRequest>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE
        .set_visibility(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn delete_note(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.delete_note(path.into_inner(), &req).await
}

pub async fn record_view(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<RecordNoteViewRequest>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE
        .record_view(path.into_inner(), body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_notes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notes")
            .route("", web::post().to(create_note))
            .route("/{id}", web::get().to(get_note))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note))
            .route("/{id}/visibility", web::put().to(set_visibility))
            .route("/{id}/views", web::post().to(record_view)),
    );
}
