use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttemptService;
use crate::models::attempts::requests::AttemptListQuery;
use crate::models::attempts::responses::{AttemptDetail, AttemptListResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_attempt(
    service: &AttemptService,
    attempt_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let attempt = match storage.get_attempt_by_id(attempt_id).await {
        Ok(Some(attempt)) => attempt,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AttemptNotFound,
                "作答不存在",
            )));
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    match storage.list_responses(attempt_id).await {
        Ok(responses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttemptDetail { attempt, responses },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn list_attempts(
    service: &AttemptService,
    query: AttemptListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_attempts(query.assessment_id, query.user_id)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttemptListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
