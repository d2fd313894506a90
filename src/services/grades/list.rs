use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::responses::{AssessmentGradeListResponse, StudentGradeListResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_by_student(
    service: &GradeService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_grades_by_student(user_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentGradeListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn list_by_assessment(
    service: &GradeService,
    assessment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_grades_by_assessment(assessment_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssessmentGradeListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn get_by_attempt(
    service: &GradeService,
    attempt_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_grade_by_attempt_id(attempt_id).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "该作答尚未评分",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
