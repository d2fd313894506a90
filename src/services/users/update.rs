use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::requests::UpdateProfileRequest};

fn user_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::UserNotFound, "用户不存在"))
}

pub async fn update_profile(
    service: &UserService,
    user_id: i64,
    mut update: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update.first_name = update.first_name.map(|s| s.trim().to_string());
    update.last_name = update.last_name.map(|s| s.trim().to_string());

    if update.first_name.as_deref() == Some("") || update.last_name.as_deref() == Some("") {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "姓名不能为空",
        )));
    }

    let storage = service.get_storage(request);

    match storage.update_user_profile(user_id, update).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "资料更新成功"))),
        Ok(None) => Ok(user_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn update_last_login(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_last_login(user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "登录时间已记录"))),
        Ok(None) => Ok(user_not_found()),
        Err(e) => Ok(e.to_http_response()),
    }
}

pub async fn deactivate(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.deactivate_user(user_id).await {
        Ok(Some(user)) => {
            warn!("用户 {} ({}) 已停用", user.id, user.email);
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "用户已停用")))
        }
        Ok(None) => {
            info!("停用失败，用户 {user_id} 不存在");
            Ok(user_not_found())
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
