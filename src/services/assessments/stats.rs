use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, assessment_not_found};
use crate::grading::analytics::summarize_assessment_attempts;
use crate::models::ApiResponse;

pub async fn get_assessment_stats(
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

    match storage.list_attempts_by_assessment(assessment_id).await {
        Ok(attempts) => {
            let stats =
                summarize_assessment_attempts(assessment.id, assessment.passing_score, &attempts);
            Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "查询成功")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
