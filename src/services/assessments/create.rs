use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use crate::models::{ApiResponse, ErrorCode, assessments::requests::CreateAssessmentRequest};
use crate::utils::validate::{AssessmentRules, validate_assessment};

pub async fn create_assessment(
    service: &AssessmentService,
    assessment: CreateAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if assessment.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "测评标题不能为空",
        )));
    }

    let rules = AssessmentRules {
        total_points: assessment.total_points,
        passing_score: assessment.passing_score,
        max_attempts: assessment.max_attempts,
        time_limit: assessment.time_limit,
        available_from: assessment.available_from,
        available_until: assessment.available_until,
    };
    if let Err(msg) = validate_assessment(&rules) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    let storage = service.get_storage(request);

    match storage.get_course_by_id(assessment.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "课程不存在",
            )));
        }
        Err(e) => return Ok(e.to_http_response()),
    }

    match storage.get_user_by_id(assessment.created_by).await {
        Ok(Some(user)) if user.role.can_grade() => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只有导师或管理员可以创建测评",
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

    match storage.create_assessment(assessment).await {
        Ok(assessment) => {
            info!(
                "课程 {} 新增测评 {} ({}, 总分 {})",
                assessment.course_id,
                assessment.id,
                assessment.assessment_type.as_str(),
                assessment.total_points
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assessment, "测评创建成功")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
