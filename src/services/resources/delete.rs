use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResourceService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_resource(
    service: &ResourceService,
    resource_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_resource(resource_id).await {
        Ok(true) => {
            info!("删除资源 {resource_id}");
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("资源已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResourceNotFound,
            "资源不存在",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
