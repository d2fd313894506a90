use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResourceService;
use crate::models::{ApiResponse, ErrorCode, resources::requests::CreateResourceRequest};
use crate::utils::validate::validate_url;

pub async fn create_resource(
    service: &ResourceService,
    mut resource: CreateResourceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if resource.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "资源标题不能为空",
        )));
    }
    resource.url = resource.url.trim().to_string();
    if let Err(msg) = validate_url(&resource.url) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }
    if let (Some(from), Some(expires)) = (resource.available_from, resource.expires_at)
        && from > expires
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "开放时间不能晚于过期时间",
        )));
    }
    // 空分类视为未分类
    resource.category = resource
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let storage = service.get_storage(request);

    match storage.get_course_by_id(resource.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "课程不存在",
            )));
        }
        Err(e) => return Ok(e.to_http_response()),
    }

    match storage.get_user_by_id(resource.created_by).await {
        Ok(Some(user)) if user.role.can_grade() && user.is_active => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只有导师或管理员可以发布资源",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "创建人不存在",
            )));
        }
        Err(e) => return Ok(e.to_http_response()),
    }

    match storage.create_resource(resource).await {
        Ok(resource) => {
            info!(
                "课程 {} 新增资源 {} ({}, {})",
                resource.course_id,
                resource.id,
                resource.resource_type.as_str(),
                resource.url
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(resource, "资源创建成功")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
