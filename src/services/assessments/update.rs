use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{AssessmentService, assessment_not_found};
use crate::models::assessments::requests::{AssessmentVisibilityRequest, UpdateAssessmentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{AssessmentRules, validate_assessment};

// 分值比较容差
const POINTS_EPSILON: f64 = 1e-6;

pub async fn update_assessment(
    service: &AssessmentService,
    assessment_id: i64,
    update: UpdateAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "测评标题不能为空",
        )));
    }

    let storage = service.get_storage(request);

    let current = match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(assessment)) => assessment,
        Ok(None) => return Ok(assessment_not_found()),
        Err(e) => return Ok(e.to_http_response()),
    };

    // 按合并后的值校验
    let rules = AssessmentRules {
        total_points: update.total_points.unwrap_or(current.total_points),
        passing_score: update.passing_score.or(current.passing_score),
        max_attempts: update.max_attempts.or(current.max_attempts),
        time_limit: update.time_limit.or(current.time_limit),
        available_from: update.available_from.or(current.available_from),
        available_until: update.available_until.or(current.available_until),
    };
    if let Err(msg) = validate_assessment(&rules) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    match storage.update_assessment(assessment_id, update).await {
        Ok(Some(assessment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "测评更新成功"))),
        Ok(None) => Ok(assessment_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn set_visibility(
    service: &AssessmentService,
    assessment_id: i64,
    body: AssessmentVisibilityRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let assessment = match storage
        .set_assessment_visibility(assessment_id, body.is_published, body.is_visible_to_students)
        .await
    {
        Ok(Some(assessment)) => assessment,
        Ok(None) => return Ok(assessment_not_found()),
        Err(e) => return Ok(e.to_http_response()),
    };

    if assessment.is_published {
        match storage.list_questions(assessment_id).await {
            Ok(questions) => {
                let sum: f64 = questions.iter().map(|q| q.points).sum();
                if (sum - assessment.total_points).abs() > POINTS_EPSILON {
                    warn!(
                        "测评 {assessment_id} 已发布，但题目分值合计 {sum} 与总分 {} 不一致",
                        assessment.total_points
                    );
                }
            }
            Err(e) => warn!("测评 {assessment_id} 题目分值检查失败: {e}"),
        }
    }

    info!(
        "测评 {assessment_id} 可见性: published={} visible={}",
        assessment.is_published, assessment.is_visible_to_students
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "测评可见性已更新")))
}
