use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResourceService;
use crate::models::resources::requests::ResourceListQuery;
use crate::models::resources::responses::{ResourceCategoriesResponse, ResourceListResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_resource(
    service: &ResourceService,
    resource_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_resource_by_id(resource_id).await {
        Ok(Some(resource)) => Ok(HttpResponse::Ok().json(ApiResponse::success(resource, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResourceNotFound,
            "资源不存在",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn list_resources(
    service: &ResourceService,
    course_id: i64,
    query: ResourceListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let category = query.category.as_deref().map(str::trim).filter(|c| !c.is_empty());

    match storage
        .list_resources(course_id, query.include_unpublished, category)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ResourceListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn list_categories(
    service: &ResourceService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_resource_categories(course_id).await {
        Ok(categories) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ResourceCategoriesResponse { categories },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
