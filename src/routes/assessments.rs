use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::grades;
use crate::models::assessments::requests::{
    AssessmentListQuery, AssessmentVisibilityRequest, CreateAssessmentRequest,
    CreateQuestionRequest, UpdateAssessmentRequest, UpdateQuestionRequest,
};
use crate::services::AssessmentService;

// 懒加载的全局 AssessmentService 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

pub async fn create_assessment(
    req: HttpRequest,
    body: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .create_assessment(body.into_inner(), &req)
        .await
}

pub async fn get_assessment(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .get_assessment(path.into_inner(), &req)
        .await
}

// 课程测评列表，挂在 /courses/{id}/assessments 下
pub async fn list_assessments(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<AssessmentListQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assessments(path.into_inner(), query.into_inner(), &req)
        .await
}

pub async fn update_assessment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_assessment(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn set_visibility(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<AssessmentVisibilityRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .set_visibility(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn get_stats(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_stats(path.into_inner(), &req).await
}

pub async fn add_question(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .add_question(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn update_question(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_question(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn delete_question(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .delete_question(path.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_assessments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assessments")
            .route("", web::post().to(create_assessment))
            .route("/{id}", web::get().to(get_assessment))
            .route("/{id}", web::put().to(update_assessment))
            .route("/{id}/visibility", web::put().to(set_visibility))
            .route("/{id}/stats", web::get().to(get_stats))
            .route("/{id}/questions", web::post().to(add_question))
            .route("/{id}/grades", web::get().to(grades::list_by_assessment)),
    )
    .service(
        web::scope("/api/v1/questions")
            .route("/{id}", web::put().to(update_question))
            .route("/{id}", web::delete().to(delete_question)),
    );
}
