use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::errors::LmsError;
use crate::grading;
use crate::models::courses::requests::{EnrollRequest, UpdateProgressRequest};
use crate::models::{ApiResponse, ErrorCode};

pub async fn enroll(
    service: &CourseService,
    course_id: i64,
    body: EnrollRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::enroll_student(storage.as_ref(), course_id, body.user_id).await {
        Ok(enrollment) => Ok(HttpResponse::Created().json(ApiResponse::success(enrollment, "选课成功"))),
        Err(LmsError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseAlreadyEnrolled,
            msg,
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn update_progress(
    service: &CourseService,
    course_id: i64,
    body: UpdateProgressRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grading::update_progress(storage.as_ref(), course_id, body.user_id, body.progress).await {
        Ok(enrollment) => Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment, "学习进度已更新"))),
        Err(LmsError::NotFound(msg)) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            msg,
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
