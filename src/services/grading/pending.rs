use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradingService;
use crate::grading;
use crate::models::ApiResponse;
use crate::models::attempts::responses::PendingGradingListResponse;

pub async fn list_pending(
    service: &GradingService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::list_pending_grading(storage.as_ref()).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PendingGradingListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
