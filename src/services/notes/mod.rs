pub mod create;
pub mod delete;
pub mod get;
pub mod update;
pub mod view;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notes::requests::{
    CreateNoteRequest, NoteListQuery, NoteVisibilityRequest, RecordNoteViewRequest,
    UpdateNoteRequest,
};
use crate::storage::Storage;

pub struct NoteService {
    storage: Option<Arc<dyn Storage>>,
}

impl NoteService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_note(
        &self,
        note: CreateNoteRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_note(self, note, request).await
    }

    // 笔记详情及浏览统计
    pub async fn get_note(&self, note_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_note(self, note_id, request).await
    }

    pub async fn list_notes(
        &self,
        course_id: i64,
        query: NoteListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_notes(self, course_id, query, request).await
    }

    pub async fn update_note(
        &self,
        note_id: i64,
        update: UpdateNoteRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_note(self, note_id, update, request).await
    }

    pub async fn set_visibility(
        &self,
        note_id: i64,
        body: NoteVisibilityRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::set_visibility(self, note_id, body, request).await
    }

    pub async fn delete_note(
        &self,
        note_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_note(self, note_id, request).await
    }

    // 记录浏览
    pub async fn record_view(
        &self,
        note_id: i64,
        body: RecordNoteViewRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        view::record_view(self, note_id, body, request).await
    }
}
