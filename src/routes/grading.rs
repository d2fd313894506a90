use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::attempts::requests::{
    FinalizeGradingRequest, GradeResponseRequest, GradingClaimRequest,
};
use crate::services::GradingService;

// 懒加载的全局 GradingService 实例
static GRADING_SERVICE: Lazy<GradingService> = Lazy::new(GradingService::new_lazy);

pub async fn list_pending(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.list_pending(&req).await
}

pub async fn claim(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<GradingClaimRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .claim(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn release(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<GradingClaimRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .release(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn finalize(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<FinalizeGradingRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .finalize(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn grade_response(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<GradeResponseRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .grade_response(path.into_inner(), body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_grading_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grading")
            .route("/pending", web::get().to(list_pending))
            .route("/attempts/{id}/claim", web::post().to(claim))
            .route("/attempts/{id}/release", web::post().to(release))
            .route("/attempts/{id}/finalize", web::post().to(finalize))
            .route("/responses/{id}", web::put().to(grade_response)),
    );
}
