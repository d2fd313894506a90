use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{assessments, notes, resources};
use crate::models::courses::requests::{
    CourseListQuery, CreateCourseRequest, EnrollRequest, SetCoursePublishedRequest,
    UpdateCourseRequest, UpdateProgressRequest,
};
use crate::services::CourseService;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(body.into_inner(), &req).await
}

pub async fn get_course(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(path.into_inner(), &req).await
}

pub async fn update_course(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(path.into_inner(), body.into_inner(), &req)
        .await
}

// 发布/下线课程
pub async fn set_published(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<SetCoursePublishedRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .set_published(path.into_inner(), body.is_published, &req)
        .await
}

pub async fn archive_course(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.archive_course(path.into_inner(), &req).await
}

pub async fn enroll(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .enroll(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn update_progress(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateProgressRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_progress(path.into_inner(), body.into_inner(), &req)
        .await
}

// 学生已选课程
pub async fn list_enrolled_courses(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .list_enrolled_courses(path.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .route("", web::get().to(list_courses))
            .route("", web::post().to(create_course))
            .route("/enrolled/{user_id}", web::get().to(list_enrolled_courses))
            .route("/{id}", web::get().to(get_course))
            .route("/{id}", web::put().to(update_course))
            .route("/{id}/published", web::put().to(set_published))
            .route("/{id}/archive", web::post().to(archive_course))
            .route("/{id}/enrollments", web::post().to(enroll))
            .route("/{id}/progress", web::put().to(update_progress))
            // 课程下的笔记、资源与测评
            .route("/{id}/notes", web::get().to(notes::list_notes))
            .route("/{id}/resources", web::get().to(resources::list_resources))
            .route(
                "/{id}/resource-categories",
                web::get().to(resources::list_categories),
            )
            .route("/{id}/assessments", web::get().to(assessments::list_assessments)),
    );
}
