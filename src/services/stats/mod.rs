use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::grading::analytics::summarize_course_analytics;
use crate::models::stats::requests::LeaderboardQuery;
use crate::models::stats::responses::LeaderboardResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct StatsService {
    storage: Option<Arc<dyn Storage>>,
}

impl StatsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学生统计
    pub async fn get_student_stats(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_student_stats(user_id).await {
            Ok(Some(stats)) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "查询成功"))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "该用户暂无学习统计",
            ))),
            Err(e) => Ok(e.to_http_response()),
        }
    }

    // 排行榜
    pub async fn get_leaderboard(
        &self,
        query: LeaderboardQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.list_leaderboard(query.limit()).await {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                LeaderboardResponse { items },
                "查询成功",
            ))),
            Err(e) => Ok(e.to_http_response()),
        }
    }

    // 课程内容分析，按内容类型分组
    pub async fn get_course_analytics(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "课程不存在",
                )));
            }
            Err(e) => return Ok(e.to_http_response()),
        }

        match storage.list_course_analytics(course_id).await {
            Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                summarize_course_analytics(course_id, rows),
                "查询成功",
            ))),
            Err(e) => Ok(e.to_http_response()),
        }
    }
}
