use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResourceService;
use crate::models::resources::requests::{ResourceVisibilityRequest, UpdateResourceRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_url;

fn resource_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ResourceNotFound,
        "资源不存在",
    ))
}

pub async fn update_resource(
    service: &ResourceService,
    resource_id: i64,
    update: UpdateResourceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "资源标题不能为空",
        )));
    }
    if let Some(url) = update.url.as_deref()
        && let Err(msg) = validate_url(url.trim())
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    let storage = service.get_storage(request);

    // 时间窗口按合并后的值校验
    let existing = match storage.get_resource_by_id(resource_id).await {
        Ok(Some(resource)) => resource,
        Ok(None) => return Ok(resource_not_found()),
        Err(e) => return Ok(e.to_http_response()),
    };
    let from = update.available_from.or(existing.available_from);
    let expires = update.expires_at.or(existing.expires_at);
    if let (Some(from), Some(expires)) = (from, expires)
        && from > expires
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "开放时间不能晚于过期时间",
        )));
    }

    match storage.update_resource(resource_id, update).await {
        Ok(Some(resource)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(resource, "资源更新成功")))
        }
        Ok(None) => Ok(resource_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn set_visibility(
    service: &ResourceService,
    resource_id: i64,
    body: ResourceVisibilityRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .set_resource_visibility(resource_id, body.is_published, body.is_visible_to_students)
        .await
    {
        Ok(Some(resource)) => {
            info!(
                "资源 {resource_id} 可见性: published={} visible={}",
                resource.is_published, resource.is_visible_to_students
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(resource, "资源可见性已更新")))
        }
        Ok(None) => Ok(resource_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}
