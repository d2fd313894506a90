use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::GradeService;

// 懒加载的全局 GradeService 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_by_student(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_by_student(path.into_inner(), &req).await
}

// 挂在 /assessments/{id}/grades 下
pub async fn list_by_assessment(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .list_by_assessment(path.into_inner(), &req)
        .await
}

// 挂在 /attempts/{id}/grade 下
pub async fn get_by_attempt(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_by_attempt(path.into_inner(), &req).await
}

pub async fn course_summary(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (user_id, course_id) = path.into_inner();
    GRADE_SERVICE
        .course_summary(user_id, course_id, &req)
        .await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .route("/students/{user_id}", web::get().to(list_by_student))
            .route(
                "/students/{user_id}/courses/{course_id}/summary",
                web::get().to(course_summary),
            ),
    );
}
