pub mod claim;
pub mod finalize;
pub mod grade;
pub mod pending;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::LmsError;
use crate::models::attempts::requests::{
    FinalizeGradingRequest, GradeResponseRequest, GradingClaimRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct GradingService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradingService {
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

    // 待评分列表
    pub async fn list_pending(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        pending::list_pending(self, request).await
    }

    pub async fn claim(
        &self,
        attempt_id: i64,
        body: GradingClaimRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        claim::claim(self, attempt_id, body, request).await
    }

    pub async fn release(
        &self,
        attempt_id: i64,
        body: GradingClaimRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        claim::release(self, attempt_id, body, request).await
    }

    // 单题打分
    pub async fn grade_response(
        &self,
        response_id: i64,
        body: GradeResponseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_response(self, response_id, body, request).await
    }

    // 完成评分
    pub async fn finalize(
        &self,
        attempt_id: i64,
        body: FinalizeGradingRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finalize::finalize(self, attempt_id, body, request).await
    }
}

// 评分流程中的冲突都来自他人认领或并发提交
fn grading_error_response(err: &LmsError) -> HttpResponse {
    match err {
        LmsError::Conflict(msg) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::GradingClaimed,
            msg.as_str(),
        )),
        other => other.to_http_response(),
    }
}
