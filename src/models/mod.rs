pub mod assessments;
pub mod attempts;
pub mod common;
pub mod courses;
pub mod grades;
pub mod notes;
pub mod resources;
pub mod stats;
pub mod users;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::Serialize;
use ts_rs::TS;

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/error_code.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 用户 2xxx
    UserNotFound = 2000,
    UserEmailInvalid = 2001,
    UserEmailAlreadyExists = 2002,

    // 课程 3xxx
    CourseNotFound = 3000,
    CourseCodeAlreadyExists = 3001,
    CourseAlreadyEnrolled = 3002,
    EnrollmentNotFound = 3003,

    // 笔记与资源 4xxx
    NoteNotFound = 4000,
    ResourceNotFound = 4100,

    // 测评 5xxx
    AssessmentNotFound = 5000,
    QuestionNotFound = 5001,
    AttemptNotFound = 5002,
    AttemptLimitExceeded = 5004,
    InvalidAttemptState = 5005,

    // 评分 6xxx
    GradeNotFound = 6000,
    InvalidGrade = 6001,
    AlreadyGraded = 6002,
    GradingClaimed = 6003,
}
