use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradingService, grading_error_response};
use crate::grading;
use crate::models::ApiResponse;
use crate::models::attempts::requests::GradeResponseRequest;

pub async fn grade_response(
    service: &GradingService,
    response_id: i64,
    body: GradeResponseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::grade_response(
        storage.as_ref(),
        response_id,
        body.points_awarded,
        body.feedback,
        body.grader_id,
    )
    .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "评分已保存"))),
        Err(e) => Ok(grading_error_response(&e)),
    }
}
