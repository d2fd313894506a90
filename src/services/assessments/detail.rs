use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, assessment_not_found};
use crate::models::ApiResponse;
use crate::models::assessments::requests::AssessmentListQuery;
use crate::models::assessments::responses::{AssessmentDetail, AssessmentListResponse};

pub async fn get_assessment(
    service: &AssessmentService,
    assessment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let assessment = match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(assessment)) => assessment,
        Ok(None) => return Ok(assessment_not_found()),
        Err(e) => return Ok(e.to_http_response()),
    };

    match storage.list_questions(assessment_id).await {
        Ok(questions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssessmentDetail {
                assessment,
                questions,
            },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn list_assessments(
    service: &AssessmentService,
    course_id: i64,
    query: AssessmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_assessments(course_id, query.include_unpublished)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssessmentListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
