use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttemptService;
use crate::grading;
use crate::models::ApiResponse;
use crate::models::attempts::requests::StartAttemptRequest;
use crate::models::attempts::responses::StartAttemptResponse;

pub async fn start_attempt(
    service: &AttemptService,
    body: StartAttemptRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::start_attempt(storage.as_ref(), body.assessment_id, body.user_id).await {
        Ok(attempt) => Ok(HttpResponse::Created().json(ApiResponse::success(
            StartAttemptResponse {
                attempt_id: attempt.id,
                attempt_number: attempt.attempt_number,
            },
            "作答已开始",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
