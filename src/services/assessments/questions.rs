use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssessmentService, assessment_not_found};
use crate::models::assessments::requests::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_question;

fn question_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::QuestionNotFound,
        "题目不存在",
    ))
}

pub async fn add_question(
    service: &AssessmentService,
    assessment_id: i64,
    question: CreateQuestionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if question.prompt.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "题干不能为空",
        )));
    }
    if let Err(msg) = validate_question(question.points, &question.kind) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    let storage = service.get_storage(request);

    match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(assessment_not_found()),
        Err(e) => return Ok(e.to_http_response()),
    }

    match storage.create_question(assessment_id, question).await {
        Ok(question) => {
            info!(
                "测评 {assessment_id} 新增题目 {} ({}, {} 分)",
                question.id,
                question.kind.type_name(),
                question.points
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(question, "题目创建成功")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn update_question(
    service: &AssessmentService,
    question_id: i64,
    update: UpdateQuestionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if update.prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "题干不能为空",
        )));
    }

    let storage = service.get_storage(request);

    let current = match storage.get_question_by_id(question_id).await {
        Ok(Some(question)) => question,
        Ok(None) => return Ok(question_not_found()),
        Err(e) => return Ok(e.to_http_response()),
    };

    let points = update.points.unwrap_or(current.points);
    let kind = update.kind.as_ref().unwrap_or(&current.kind);
    if let Err(msg) = validate_question(points, kind) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    match storage.update_question(question_id, update).await {
        Ok(Some(question)) => Ok(HttpResponse::Ok().json(ApiResponse::success(question, "题目更新成功"))),
        Ok(None) => Ok(question_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn delete_question(
    service: &AssessmentService,
    question_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_question(question_id).await {
        Ok(true) => {
            info!("删除题目 {question_id}");
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("题目已删除")))
        }
        Ok(false) => Ok(question_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}
