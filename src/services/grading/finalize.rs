use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradingService, grading_error_response};
use crate::grading;
use crate::models::ApiResponse;
use crate::models::attempts::requests::FinalizeGradingRequest;

pub async fn finalize(
    service: &GradingService,
    attempt_id: i64,
    body: FinalizeGradingRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::finalize_grading(storage.as_ref(), attempt_id, body.feedback, body.grader_id)
        .await
    {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result, "评分已完成"))),
        Err(e) => Ok(grading_error_response(&e)),
    }
}
