pub mod list;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    // 学生全部成绩
    pub async fn list_by_student(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_by_student(self, user_id, request).await
    }

    // 测评下全部成绩
    pub async fn list_by_assessment(
        &self,
        assessment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_by_assessment(self, assessment_id, request).await
    }

    pub async fn get_by_attempt(
        &self,
        attempt_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::get_by_attempt(self, attempt_id, request).await
    }

    // 课程成绩汇总
    pub async fn course_summary(
        &self,
        user_id: i64,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::course_summary(self, user_id, course_id, request).await
    }
}
