//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，每个变体带有错误代码、类型名称和对应的 HTTP 语义。

use std::fmt;

use actix_web::{HttpResponse, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_lms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum LmsError {
            $($variant(String),)*
        }

        impl LmsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LmsError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl LmsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LmsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_lms_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Serialization("E006", "Serialization Error"),
    Authorization("E007", "Authorization Error"),
    AttemptLimitExceeded("E008", "Attempt Limit Exceeded"),
    InvalidGrade("E009", "Invalid Grade"),
    AlreadyGraded("E010", "Already Graded"),
    InvalidState("E011", "Invalid State"),
    Conflict("E012", "Conflict"),
}

impl LmsError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            LmsError::NotFound(_) => StatusCode::NOT_FOUND,
            LmsError::AttemptLimitExceeded(_) | LmsError::Authorization(_) => {
                StatusCode::FORBIDDEN
            }
            LmsError::InvalidGrade(_) | LmsError::Validation(_) => StatusCode::BAD_REQUEST,
            LmsError::AlreadyGraded(_) | LmsError::InvalidState(_) | LmsError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            LmsError::NotFound(_) => ErrorCode::NotFound,
            LmsError::AttemptLimitExceeded(_) => ErrorCode::AttemptLimitExceeded,
            LmsError::Authorization(_) => ErrorCode::Forbidden,
            LmsError::InvalidGrade(_) => ErrorCode::InvalidGrade,
            LmsError::Validation(_) => ErrorCode::BadRequest,
            LmsError::AlreadyGraded(_) => ErrorCode::AlreadyGraded,
            LmsError::InvalidState(_) => ErrorCode::InvalidAttemptState,
            LmsError::Conflict(_) => ErrorCode::Conflict,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 是否为可重试的并发冲突
    pub fn is_conflict(&self) -> bool {
        matches!(self, LmsError::Conflict(_))
    }

    /// 转换为统一格式的 HTTP 响应
    pub fn to_http_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.error_code(), self.message()))
    }
}

impl fmt::Display for LmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LmsError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LmsError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束冲突视为并发冲突，交由上层决定是否重试
        if matches!(
            err.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        ) {
            return LmsError::Conflict(err.to_string());
        }
        LmsError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LmsError {
    fn from(err: serde_json::Error) -> Self {
        LmsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LmsError::database_config("test").code(), "E001");
        assert_eq!(LmsError::validation("test").code(), "E004");
        assert_eq!(LmsError::attempt_limit_exceeded("test").code(), "E008");
        assert_eq!(LmsError::conflict("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            LmsError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            LmsError::already_graded("test").error_type(),
            "Already Graded"
        );
    }

    #[test]
    fn test_error_message() {
        let err = LmsError::invalid_grade("得分超出范围");
        assert_eq!(err.message(), "得分超出范围");
    }

    #[test]
    fn test_format_simple() {
        let err = LmsError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(LmsError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            LmsError::attempt_limit_exceeded("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            LmsError::invalid_grade("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LmsError::already_graded("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            LmsError::invalid_state("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            LmsError::authorization("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            LmsError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_detection() {
        assert!(LmsError::conflict("x").is_conflict());
        assert!(!LmsError::not_found("x").is_conflict());
    }
}
