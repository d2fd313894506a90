pub mod create;
pub mod detail;
pub mod questions;
pub mod stats;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::requests::{
    AssessmentListQuery, AssessmentVisibilityRequest, CreateAssessmentRequest,
    CreateQuestionRequest, UpdateAssessmentRequest, UpdateQuestionRequest,
};
use crate::storage::Storage;

pub struct AssessmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssessmentService {
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

    pub async fn create_assessment(
        &self,
        assessment: CreateAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assessment(self, assessment, request).await
    }

    // 测评详情（含题目）
    pub async fn get_assessment(
        &self,
        assessment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::get_assessment(self, assessment_id, request).await
    }

    pub async fn list_assessments(
        &self,
        course_id: i64,
        query: AssessmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::list_assessments(self, course_id, query, request).await
    }

    pub async fn update_assessment(
        &self,
        assessment_id: i64,
        update: UpdateAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assessment(self, assessment_id, update, request).await
    }

    pub async fn set_visibility(
        &self,
        assessment_id: i64,
        body: AssessmentVisibilityRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::set_visibility(self, assessment_id, body, request).await
    }

    pub async fn add_question(
        &self,
        assessment_id: i64,
        question: CreateQuestionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        questions::add_question(self, assessment_id, question, request).await
    }

    pub async fn update_question(
        &self,
        question_id: i64,
        update: UpdateQuestionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        questions::update_question(self, question_id, update, request).await
    }

    pub async fn delete_question(
        &self,
        question_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        questions::delete_question(self, question_id, request).await
    }

    // 作答统计
    pub async fn get_stats(
        &self,
        assessment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stats::get_assessment_stats(self, assessment_id, request).await
    }
}

fn assessment_not_found() -> HttpResponse {
    use crate::models::{ApiResponse, ErrorCode};

    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AssessmentNotFound,
        "测评不存在",
    ))
}
