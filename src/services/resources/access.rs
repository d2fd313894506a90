use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResourceService;
use crate::grading;
use crate::models::ApiResponse;
use crate::models::resources::requests::RecordResourceAccessRequest;

pub async fn record_access(
    service: &ResourceService,
    resource_id: i64,
    body: RecordResourceAccessRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::record_resource_access(storage.as_ref(), resource_id, body.user_id, body.action)
        .await
    {
        Ok(access) => Ok(HttpResponse::Created().json(ApiResponse::success(access, "访问已记录"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
