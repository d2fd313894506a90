use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::stats::requests::LeaderboardQuery;
use crate::services::StatsService;

// 懒加载的全局 StatsService 实例
static STATS_SERVICE: Lazy<StatsService> = Lazy::new(StatsService::new_lazy);

pub async fn get_student_stats(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    STATS_SERVICE
        .get_student_stats(path.into_inner(), &req)
        .await
}

pub async fn get_leaderboard(
    req: HttpRequest,
    query: web::Query<LeaderboardQuery>,
) -> ActixResult<HttpResponse> {
    STATS_SERVICE.get_leaderboard(query.into_inner(), &req).await
}

pub async fn get_course_analytics(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    STATS_SERVICE
        .get_course_analytics(path.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/stats")
            .route("/leaderboard", web::get().to(get_leaderboard))
            .route("/students/{user_id}", web::get().to(get_student_stats))
            .route("/courses/{course_id}", web::get().to(get_course_analytics)),
    );
}
