use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttemptService;
use crate::grading;
use crate::models::ApiResponse;
use crate::models::attempts::entities::AttemptStatus;
use crate::models::attempts::requests::SubmitResponseRequest;
use crate::models::attempts::responses::SubmitResponseResponse;

pub async fn submit_response(
    service: &AttemptService,
    attempt_id: i64,
    body: SubmitResponseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::submit_response(storage.as_ref(), attempt_id, body.question_id, body.answer).await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmitResponseResponse {
                response_id: response.id,
                is_auto_graded: response.is_auto_graded,
                is_correct: response.is_correct,
                points_awarded: response.points_awarded,
            },
            "答案已保存",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn submit_attempt(
    service: &AttemptService,
    attempt_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::submit_attempt(storage.as_ref(), attempt_id).await {
        Ok(result) => {
            let message = match result.status {
                AttemptStatus::Graded => "作答已提交并完成评分",
                _ => "作答已提交，等待人工评分",
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, message)))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
