use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::grading::analytics::summarize_course_grades;
use crate::models::ApiResponse;

// 汇总在读取时计算，不落库
pub async fn course_summary(
    service: &GradeService,
    user_id: i64,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_grades_by_student_and_course(user_id, course_id)
        .await
    {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize_course_grades(user_id, course_id, &grades),
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
