use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::resources::requests::{
    CreateResourceRequest, RecordResourceAccessRequest, ResourceListQuery,
    ResourceVisibilityRequest, UpdateResourceRequest,
};
use crate::services::ResourceService;

// 懒加载的全局 ResourceService 实例
static RESOURCE_SERVICE: Lazy<ResourceService> = Lazy::new(ResourceService::new_lazy);

pub async fn create_resource(
    req: HttpRequest,
    body: web::Json<CreateResourceRequest>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.create_resource(body.into_inner(), &req).await
}

pub async fn get_resource(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.get_resource(path.into_inner(), &req).await
}

// 课程资源列表，挂在 /courses/{id}/resources 下
pub async fn list_resources(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<ResourceListQuery>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE
        .list_resources(path.into_inner(), query.into_inner(), &req)
        .await
}

pub async fn list_categories(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.list_categories(path.into_inner(), &req).await
}

pub async fn update_resource(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateResourceRequest>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE
        .update_resource(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn set_visibility(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ResourceVisibilityRequest>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE
        .set_visibility(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn delete_resource(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE.delete_resource(path.into_inner(), &req).await
}

pub async fn record_access(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<RecordResourceAccessRequest>,
) -> ActixResult<HttpResponse> {
    RESOURCE_SERVICE
        .record_access(path.into_inner(), body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_resources_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/resources")
            .route("", web::post().to(create_resource))
            .route("/{id}", web::get().to(get_resource))
            .route("/{id}", web::put().to(update_resource))
            .route("/{id}", web::delete().to(delete_resource))
            .route("/{id}/visibility", web::put().to(set_visibility))
            .route("/{id}/access", web::post().to(record_access)),
    );
}
