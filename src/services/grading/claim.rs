use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradingService, grading_error_response};
use crate::grading;
use crate::models::ApiResponse;
use crate::models::attempts::requests::GradingClaimRequest;

pub async fn claim(
    service: &GradingService,
    attempt_id: i64,
    body: GradingClaimRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::claim_grading(storage.as_ref(), attempt_id, body.grader_id).await {
        Ok(attempt) => Ok(HttpResponse::Ok().json(ApiResponse::success(attempt, "认领成功"))),
        Err(e) => Ok(grading_error_response(&e)),
    }
}

pub async fn release(
    service: &GradingService,
    attempt_id: i64,
    body: GradingClaimRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::release_grading(storage.as_ref(), attempt_id, body.grader_id).await {
        Ok(attempt) => Ok(HttpResponse::Ok().json(ApiResponse::success(attempt, "已释放认领"))),
        Err(e) => Ok(grading_error_response(&e)),
    }
}
