use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::errors::LmsError;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::utils::validate::validate_course_code;

pub async fn create_course(
    service: &CourseService,
    mut course: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    course.code = course.code.trim().to_uppercase();

    if let Err(msg) = validate_course_code(&course.code) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }
    if course.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "课程名称不能为空",
        )));
    }
    if let (Some(start), Some(end)) = (course.start_date, course.end_date)
        && start > end
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "开课时间不能晚于结课时间",
        )));
    }

    let storage = service.get_storage(request);

    // 创建人须为导师或管理员
    match storage.get_user_by_id(course.created_by).await {
        Ok(Some(user)) if user.role.can_grade() => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只有导师或管理员可以创建课程",
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

    match storage.create_course(course).await {
        Ok(course) => {
            info!("创建课程 {} ({})", course.code, course.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "课程创建成功")))
        }
        Err(LmsError::Conflict(_)) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseCodeAlreadyExists,
            "课程代码已存在",
        ))),
        Err(e) => {
            error!("创建课程失败: {e}");
            Ok(e.to_http_response())
        }
    }
}
