use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

// JSON 请求体解析失败时返回统一格式
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("JSON 解析失败 {} {}: {err}", req.method(), req.path());

    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type 必须为 application/json".to_string(),
        JsonPayloadError::OverflowKnownLength { length, limit } => {
            format!("请求体过大: {length} > {limit}")
        }
        JsonPayloadError::Overflow { limit } => format!("请求体超过上限 {limit}"),
        JsonPayloadError::Deserialize(e) => format!("请求参数错误: {e}"),
        other => format!("请求体无效: {other}"),
    };

    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

// 查询参数解析失败时返回统一格式
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("查询参数解析失败 {} {}: {err}", req.method(), req.path());

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("查询参数错误: {err}"),
    ));
    InternalError::from_response(err, response).into()
}

// 路径参数解析失败时返回统一格式，例如 /courses/abc
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    debug!("路径参数解析失败 {} {}: {err}", req.method(), req.path());

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("路径参数错误: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
