use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::grades;
use crate::models::attempts::requests::{
    AttemptListQuery, StartAttemptRequest, SubmitResponseRequest,
};
use crate::services::AttemptService;

// 懒加载的全局 AttemptService 实例
static ATTEMPT_SERVICE: Lazy<AttemptService> = Lazy::new(AttemptService::new_lazy);

// 开始作答
pub async fn start_attempt(
    req: HttpRequest,
    body: web::Json<StartAttemptRequest>,
) -> ActixResult<HttpResponse> {
    ATTEMPT_SERVICE.start_attempt(body.into_inner(), &req).await
}

// 某学生在某测评下的全部作答
pub async fn list_attempts(
    req: HttpRequest,
    query: web::Query<AttemptListQuery>,
) -> ActixResult<HttpResponse> {
    ATTEMPT_SERVICE.list_attempts(query.into_inner(), &req).await
}

pub async fn get_attempt(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ATTEMPT_SERVICE.get_attempt(path.into_inner(), &req).await
}

pub async fn submit_response(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<SubmitResponseRequest>,
) -> ActixResult<HttpResponse> {
    ATTEMPT_SERVICE
        .submit_response(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn submit_attempt(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ATTEMPT_SERVICE
        .submit_attempt(path.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_attempts_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attempts")
            .route("", web::post().to(start_attempt))
            .route("", web::get().to(list_attempts))
            .route("/{id}", web::get().to(get_attempt))
            .route("/{id}/responses", web::put().to(submit_response))
            .route("/{id}/submit", web::post().to(submit_attempt))
            .route("/{id}/grade", web::get().to(grades::get_by_attempt)),
    );
}
