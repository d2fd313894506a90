use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{
    assessments::{
        entities::{Assessment, Question},
        requests::{
            CreateAssessmentRequest, CreateQuestionRequest, UpdateAssessmentRequest,
            UpdateQuestionRequest,
        },
    },
    attempts::{
        entities::{AnswerPayload, Attempt, AttemptStatus, QuestionResponse},
        responses::PendingGradingItem,
    },
    courses::{
        entities::{Course, Enrollment},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::EnrolledCourse,
    },
    grades::{
        entities::Grade,
        responses::{AssessmentGradeItem, StudentGradeItem},
    },
    notes::{
        entities::{Note, NoteView},
        requests::{CreateNoteRequest, UpdateNoteRequest},
    },
    resources::{
        entities::{AccessAction, Resource, ResourceAccess},
        requests::{CreateResourceRequest, UpdateResourceRequest},
    },
    stats::{
        entities::{ContentAnalytics, ContentType, StudentStats},
        responses::LeaderboardEntry,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateProfileRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 学生统计写入，`expected_version` 为空时插入新行
#[derive(Debug, Clone)]
pub struct StatsWrite {
    pub expected_version: Option<i32>,
    pub stats: StudentStats,
}

/// 内容分析写入，`previous` 为空时插入新行
#[derive(Debug, Clone)]
pub struct AnalyticsWrite {
    pub previous: Option<ContentAnalytics>,
    pub analytics: ContentAnalytics,
}

/// 题目作答写入，按 (attempt_id, question_id) 覆盖
#[derive(Debug, Clone)]
pub struct ResponseUpsert {
    pub attempt_id: i64,
    pub question_id: i64,
    pub answer: AnswerPayload,
    pub is_auto_graded: bool,
    pub is_correct: Option<bool>,
    pub points_awarded: Option<f64>,
    pub answered_at: DateTime<Utc>,
}

/// 人工评分单题
#[derive(Debug, Clone)]
pub struct ResponseGradeWrite {
    pub response_id: i64,
    pub attempt_id: i64,
    // 作答状态须仍在其中之一
    pub allowed_statuses: Vec<AttemptStatus>,
    pub points_awarded: f64,
    pub feedback: Option<String>,
    pub graded_by: i64,
    pub graded_at: DateTime<Utc>,
}

/// 成绩快照
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub user_id: i64,
    pub course_id: i64,
    pub assessment_id: i64,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub letter_grade: String,
    pub recorded_by: Option<i64>,
}

/// 评分提交：作答状态比较并交换、写入成绩、更新学生统计与测评分析，在同一事务中完成
#[derive(Debug, Clone)]
pub struct GradingCommit {
    pub attempt_id: i64,
    pub expected_status: AttemptStatus,
    // 期望状态为 grading 时须由认领人提交
    pub expected_claimed_by: Option<i64>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub total_score: f64,
    pub percentage: f64,
    pub is_passed: bool,
    pub feedback: Option<String>,
    pub graded_by: Option<i64>,
    pub graded_at: DateTime<Utc>,
    pub grade: NewGrade,
    pub stats: StatsWrite,
    pub analytics: AnalyticsWrite,
}

/// 笔记浏览提交
#[derive(Debug, Clone)]
pub struct NoteViewCommit {
    pub note_id: i64,
    pub user_id: i64,
    pub duration: Option<i64>,
    pub viewed_at: DateTime<Utc>,
    pub stats: StatsWrite,
    pub analytics: AnalyticsWrite,
}

/// 资源访问提交，只更新资源分析
#[derive(Debug, Clone)]
pub struct ResourceAccessCommit {
    pub resource_id: i64,
    pub user_id: i64,
    pub action: AccessAction,
    pub accessed_at: DateTime<Utc>,
    pub analytics: AnalyticsWrite,
}

/// 选课提交
#[derive(Debug, Clone)]
pub struct EnrollmentCommit {
    pub user_id: i64,
    pub course_id: i64,
    pub enrolled_at: DateTime<Utc>,
    pub stats: StatsWrite,
}

/// 学习进度提交，`completion` 不为空时同时标记完成
#[derive(Debug, Clone)]
pub struct ProgressCommit {
    pub enrollment_id: i64,
    pub progress: f64,
    pub completion: Option<CompletionWrite>,
}

#[derive(Debug, Clone)]
pub struct CompletionWrite {
    pub completed_at: DateTime<Utc>,
    pub stats: StatsWrite,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，学生同时创建统计行
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>>;
    async fn update_last_login(&self, id: i64) -> Result<Option<User>>;
    async fn deactivate_user(&self, id: i64) -> Result<Option<User>>;

    /// 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    async fn set_course_published(&self, course_id: i64, published: bool)
    -> Result<Option<Course>>;
    async fn archive_course(&self, course_id: i64) -> Result<Option<Course>>;
    async fn list_courses(&self, query: CourseListQuery) -> Result<Vec<Course>>;

    /// 选课方法
    async fn get_enrollment(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>>;
    async fn enroll_student(&self, commit: EnrollmentCommit) -> Result<Enrollment>;
    async fn update_enrollment_progress(&self, commit: ProgressCommit) -> Result<Enrollment>;
    async fn list_enrolled_courses(&self, user_id: i64) -> Result<Vec<EnrolledCourse>>;

    /// 笔记方法
    async fn create_note(&self, note: CreateNoteRequest) -> Result<Note>;
    async fn get_note_by_id(&self, note_id: i64) -> Result<Option<Note>>;
    async fn update_note(&self, note_id: i64, update: UpdateNoteRequest) -> Result<Option<Note>>;
    async fn set_note_visibility(
        &self,
        note_id: i64,
        is_published: bool,
        is_visible_to_students: bool,
    ) -> Result<Option<Note>>;
    // 删除笔记及其浏览记录
    async fn delete_note(&self, note_id: i64) -> Result<bool>;
    async fn list_notes(&self, course_id: i64, include_unpublished: bool) -> Result<Vec<Note>>;
    async fn has_viewed_note(&self, note_id: i64, user_id: i64) -> Result<bool>;
    // 返回 (总浏览次数, 独立浏览人数)
    async fn count_note_views(&self, note_id: i64) -> Result<(i64, i64)>;
    // 带时长的浏览次数
    async fn count_timed_note_views(&self, note_id: i64) -> Result<i64>;
    async fn record_note_view(&self, commit: NoteViewCommit) -> Result<NoteView>;

    /// 资源方法
    async fn create_resource(&self, resource: CreateResourceRequest) -> Result<Resource>;
    async fn get_resource_by_id(&self, resource_id: i64) -> Result<Option<Resource>>;
    async fn update_resource(
        &self,
        resource_id: i64,
        update: UpdateResourceRequest,
    ) -> Result<Option<Resource>>;
    async fn set_resource_visibility(
        &self,
        resource_id: i64,
        is_published: bool,
        is_visible_to_students: bool,
    ) -> Result<Option<Resource>>;
    // 删除资源及其访问记录
    async fn delete_resource(&self, resource_id: i64) -> Result<bool>;
    async fn list_resources(
        &self,
        course_id: i64,
        include_unpublished: bool,
        category: Option<&str>,
    ) -> Result<Vec<Resource>>;
    async fn list_resource_categories(&self, course_id: i64) -> Result<Vec<String>>;
    async fn has_accessed_resource(&self, resource_id: i64, user_id: i64) -> Result<bool>;
    async fn record_resource_access(&self, commit: ResourceAccessCommit) -> Result<ResourceAccess>;

    /// 测评定义方法
    async fn create_assessment(&self, assessment: CreateAssessmentRequest) -> Result<Assessment>;
    async fn get_assessment_by_id(&self, assessment_id: i64) -> Result<Option<Assessment>>;
    async fn update_assessment(
        &self,
        assessment_id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>>;
    async fn set_assessment_visibility(
        &self,
        assessment_id: i64,
        is_published: bool,
        is_visible_to_students: bool,
    ) -> Result<Option<Assessment>>;
    async fn list_assessments(
        &self,
        course_id: i64,
        include_unpublished: bool,
    ) -> Result<Vec<Assessment>>;
    async fn create_question(
        &self,
        assessment_id: i64,
        question: CreateQuestionRequest,
    ) -> Result<Question>;
    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>>;
    async fn update_question(
        &self,
        question_id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>>;
    async fn delete_question(&self, question_id: i64) -> Result<bool>;
    async fn list_questions(&self, assessment_id: i64) -> Result<Vec<Question>>;

    /// 作答方法
    async fn count_attempts(&self, assessment_id: i64, user_id: i64) -> Result<i64>;
    // 序号冲突时返回 Conflict
    async fn create_attempt(
        &self,
        assessment_id: i64,
        user_id: i64,
        attempt_number: i32,
        started_at: DateTime<Utc>,
    ) -> Result<Attempt>;
    async fn get_attempt_by_id(&self, attempt_id: i64) -> Result<Option<Attempt>>;
    async fn list_attempts(&self, assessment_id: i64, user_id: i64) -> Result<Vec<Attempt>>;
    async fn list_attempts_by_assessment(&self, assessment_id: i64) -> Result<Vec<Attempt>>;
    async fn upsert_response(&self, response: ResponseUpsert) -> Result<QuestionResponse>;
    async fn get_response_by_id(&self, response_id: i64) -> Result<Option<QuestionResponse>>;
    async fn list_responses(&self, attempt_id: i64) -> Result<Vec<QuestionResponse>>;

    /// 评分流程方法
    // in_progress -> submitted，状态不符返回 Conflict
    async fn mark_attempt_submitted(
        &self,
        attempt_id: i64,
        submitted_at: DateTime<Utc>,
    ) -> Result<()>;
    // submitted -> grading，状态不符返回 false
    async fn claim_attempt(&self, attempt_id: i64, grader_id: i64) -> Result<bool>;
    // grading -> submitted，仅认领人可释放
    async fn release_attempt(&self, attempt_id: i64, grader_id: i64) -> Result<bool>;
    async fn grade_response(&self, write: ResponseGradeWrite) -> Result<QuestionResponse>;
    async fn commit_grading(&self, commit: GradingCommit) -> Result<Grade>;
    async fn list_pending_grading(&self) -> Result<Vec<PendingGradingItem>>;

    /// 成绩方法
    async fn get_grade_by_attempt_id(&self, attempt_id: i64) -> Result<Option<Grade>>;
    async fn list_grades_by_student(&self, user_id: i64) -> Result<Vec<StudentGradeItem>>;
    async fn list_grades_by_student_and_course(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Vec<Grade>>;
    async fn list_grades_by_assessment(&self, assessment_id: i64)
    -> Result<Vec<AssessmentGradeItem>>;

    /// 统计方法
    async fn get_student_stats(&self, user_id: i64) -> Result<Option<StudentStats>>;
    async fn list_leaderboard(&self, limit: u64) -> Result<Vec<LeaderboardEntry>>;
    async fn get_content_analytics(
        &self,
        content_type: ContentType,
        content_id: i64,
    ) -> Result<Option<ContentAnalytics>>;
    async fn list_course_analytics(&self, course_id: i64) -> Result<Vec<ContentAnalytics>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
