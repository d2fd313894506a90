use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};

fn course_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::CourseNotFound,
        "课程不存在",
    ))
}

pub async fn update_course(
    service: &CourseService,
    course_id: i64,
    update: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "课程名称不能为空",
        )));
    }

    let storage = service.get_storage(request);

    let current = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(course_not_found()),
        Err(e) => return Ok(e.to_http_response()),
    };

    // 合并后再校验时间范围
    let start = update.start_date.or(current.start_date);
    let end = update.end_date.or(current.end_date);
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "开课时间不能晚于结课时间",
        )));
    }

    match storage.update_course(course_id, update).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程更新成功"))),
        Ok(None) => Ok(course_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn set_published(
    service: &CourseService,
    course_id: i64,
    published: bool,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_course_published(course_id, published).await {
        Ok(Some(course)) => {
            info!(
                "课程 {} {}",
                course.code,
                if published { "已发布" } else { "已下线" }
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程状态已更新")))
        }
        Ok(None) => Ok(course_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn archive_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.archive_course(course_id).await {
        Ok(Some(course)) => {
            info!("课程 {} 已归档", course.code);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程已归档")))
        }
        Ok(None) => Ok(course_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}
