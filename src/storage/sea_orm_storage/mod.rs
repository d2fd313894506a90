//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 多表写入在单个事务中完成，聚合行通过版本号或计数列做比较并交换。

mod aggregates;
mod assessments;
mod attempts;
mod courses;
mod grades;
mod grading;
mod notes;
mod resources;
mod stats;
mod users;

use crate::config::AppConfig;
use crate::errors::{LmsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

/// 数据库错误转换，唯一约束冲突映射为 Conflict
pub(crate) fn db_err(context: &'static str) -> impl FnOnce(DbErr) -> LmsError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => LmsError::conflict(format!("{context}: {e}")),
        _ => LmsError::database_operation(format!("{context}: {e}")),
    }
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| LmsError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接
    ///
    /// 文件库使用 WAL；内存库只保留一个常驻连接，否则每个连接各自是一个空库。
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LmsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let mut pool = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(timeout));

        if in_memory {
            opt = opt.journal_mode(SqliteJournalMode::Memory);
            pool = pool
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory");
            pool = pool
                .max_connections(pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300));
        }

        let pool = pool
            .connect_with(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LmsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assessments::{
        entities::{Assessment, Question},
        requests::{
            CreateAssessmentRequest, CreateQuestionRequest, UpdateAssessmentRequest,
            UpdateQuestionRequest,
        },
    },
    attempts::{
        entities::{Attempt, QuestionResponse},
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
        entities::{Resource, ResourceAccess},
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
use crate::storage::{
    EnrollmentCommit, GradingCommit, NoteViewCommit, ProgressCommit, ResourceAccessCommit,
    ResponseGradeWrite, ResponseUpsert, Storage,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>> {
        self.update_user_profile_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<Option<User>> {
        self.update_last_login_impl(id).await
    }

    async fn deactivate_user(&self, id: i64) -> Result<Option<User>> {
        self.deactivate_user_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(code).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn set_course_published(
        &self,
        course_id: i64,
        published: bool,
    ) -> Result<Option<Course>> {
        self.set_course_published_impl(course_id, published).await
    }

    async fn archive_course(&self, course_id: i64) -> Result<Option<Course>> {
        self.archive_course_impl(course_id).await
    }

    async fn list_courses(&self, query: CourseListQuery) -> Result<Vec<Course>> {
        self.list_courses_impl(query).await
    }

    // 选课模块
    async fn get_enrollment(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(user_id, course_id).await
    }

    async fn enroll_student(&self, commit: EnrollmentCommit) -> Result<Enrollment> {
        self.enroll_student_impl(commit).await
    }

    async fn update_enrollment_progress(&self, commit: ProgressCommit) -> Result<Enrollment> {
        self.update_enrollment_progress_impl(commit).await
    }

    async fn list_enrolled_courses(&self, user_id: i64) -> Result<Vec<EnrolledCourse>> {
        self.list_enrolled_courses_impl(user_id).await
    }

    // 笔记模块
    async fn create_note(&self, note: CreateNoteRequest) -> Result<Note> {
        self.create_note_impl(note).await
    }

    async fn get_note_by_id(&self, note_id: i64) -> Result<Option<Note>> {
        self.get_note_by_id_impl(note_id).await
    }

    async fn update_note(&self, note_id: i64, update: UpdateNoteRequest) -> Result<Option<Note>> {
        self.update_note_impl(note_id, update).await
    }

    async fn set_note_visibility(
        &self,
        note_id: i64,
        is_published: bool,
        is_visible_to_students: bool,
    ) -> Result<Option<Note>> {
        self.set_note_visibility_impl(note_id, is_published, is_visible_to_students)
            .await
    }

    async fn delete_note(&self, note_id: i64) -> Result<bool> {
        self.delete_note_impl(note_id).await
    }

    async fn list_notes(&self, course_id: i64, include_unpublished: bool) -> Result<Vec<Note>> {
        self.list_notes_impl(course_id, include_unpublished).await
    }

    async fn has_viewed_note(&self, note_id: i64, user_id: i64) -> Result<bool> {
        self.has_viewed_note_impl(note_id, user_id).await
    }

    async fn count_note_views(&self, note_id: i64) -> Result<(i64, i64)> {
        self.count_note_views_impl(note_id).await
    }

    async fn count_timed_note_views(&self, note_id: i64) -> Result<i64> {
        self.count_timed_note_views_impl(note_id).await
    }

    async fn record_note_view(&self, commit: NoteViewCommit) -> Result<NoteView> {
        self.record_note_view_impl(commit).await
    }

    // 资源模块
    async fn create_resource(&self, resource: CreateResourceRequest) -> Result<Resource> {
        self.create_resource_impl(resource).await
    }

    async fn get_resource_by_id(&self, resource_id: i64) -> Result<Option<Resource>> {
        self.get_resource_by_id_impl(resource_id).await
    }

    async fn update_resource(
        &self,
        resource_id: i64,
        update: UpdateResourceRequest,
    ) -> Result<Option<Resource>> {
        self.update_resource_impl(resource_id, update).await
    }

    async fn set_resource_visibility(
        &self,
        resource_id: i64,
        is_published: bool,
        is_visible_to_students: bool,
    ) -> Result<Option<Resource>> {
        self.set_resource_visibility_impl(resource_id, is_published, is_visible_to_students)
            .await
    }

    async fn delete_resource(&self, resource_id: i64) -> Result<bool> {
        self.delete_resource_impl(resource_id).await
    }

    async fn list_resources(
        &self,
        course_id: i64,
        include_unpublished: bool,
        category: Option<&str>,
    ) -> Result<Vec<Resource>> {
        self.list_resources_impl(course_id, include_unpublished, category)
            .await
    }

    async fn list_resource_categories(&self, course_id: i64) -> Result<Vec<String>> {
        self.list_resource_categories_impl(course_id).await
    }

    async fn has_accessed_resource(&self, resource_id: i64, user_id: i64) -> Result<bool> {
        self.has_accessed_resource_impl(resource_id, user_id).await
    }

    async fn record_resource_access(&self, commit: ResourceAccessCommit) -> Result<ResourceAccess> {
        self.record_resource_access_impl(commit).await
    }

    // 测评模块
    async fn create_assessment(&self, assessment: CreateAssessmentRequest) -> Result<Assessment> {
        self.create_assessment_impl(assessment).await
    }

    async fn get_assessment_by_id(&self, assessment_id: i64) -> Result<Option<Assessment>> {
        self.get_assessment_by_id_impl(assessment_id).await
    }

    async fn update_assessment(
        &self,
        assessment_id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        self.update_assessment_impl(assessment_id, update).await
    }

    async fn set_assessment_visibility(
        &self,
        assessment_id: i64,
        is_published: bool,
        is_visible_to_students: bool,
    ) -> Result<Option<Assessment>> {
        self.set_assessment_visibility_impl(assessment_id, is_published, is_visible_to_students)
            .await
    }

    async fn list_assessments(
        &self,
        course_id: i64,
        include_unpublished: bool,
    ) -> Result<Vec<Assessment>> {
        self.list_assessments_impl(course_id, include_unpublished)
            .await
    }

    async fn create_question(
        &self,
        assessment_id: i64,
        question: CreateQuestionRequest,
    ) -> Result<Question> {
        self.create_question_impl(assessment_id, question).await
    }

    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>> {
        self.get_question_by_id_impl(question_id).await
    }

    async fn update_question(
        &self,
        question_id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>> {
        self.update_question_impl(question_id, update).await
    }

    async fn delete_question(&self, question_id: i64) -> Result<bool> {
        self.delete_question_impl(question_id).await
    }

    async fn list_questions(&self, assessment_id: i64) -> Result<Vec<Question>> {
        self.list_questions_impl(assessment_id).await
    }

    // 作答模块
    async fn count_attempts(&self, assessment_id: i64, user_id: i64) -> Result<i64> {
        self.count_attempts_impl(assessment_id, user_id).await
    }

    async fn create_attempt(
        &self,
        assessment_id: i64,
        user_id: i64,
        attempt_number: i32,
        started_at: DateTime<Utc>,
    ) -> Result<Attempt> {
        self.create_attempt_impl(assessment_id, user_id, attempt_number, started_at)
            .await
    }

    async fn get_attempt_by_id(&self, attempt_id: i64) -> Result<Option<Attempt>> {
        self.get_attempt_by_id_impl(attempt_id).await
    }

    async fn list_attempts(&self, assessment_id: i64, user_id: i64) -> Result<Vec<Attempt>> {
        self.list_attempts_impl(assessment_id, user_id).await
    }

    async fn list_attempts_by_assessment(&self, assessment_id: i64) -> Result<Vec<Attempt>> {
        self.list_attempts_by_assessment_impl(assessment_id).await
    }

    async fn upsert_response(&self, response: ResponseUpsert) -> Result<QuestionResponse> {
        self.upsert_response_impl(response).await
    }

    async fn get_response_by_id(&self, response_id: i64) -> Result<Option<QuestionResponse>> {
        self.get_response_by_id_impl(response_id).await
    }

    async fn list_responses(&self, attempt_id: i64) -> Result<Vec<QuestionResponse>> {
        self.list_responses_impl(attempt_id).await
    }

    // 评分流程模块
    async fn mark_attempt_submitted(
        &self,
        attempt_id: i64,
        submitted_at: DateTime<Utc>,
    ) -> Result<()> {
        self.mark_attempt_submitted_impl(attempt_id, submitted_at)
            .await
    }

    async fn claim_attempt(&self, attempt_id: i64, grader_id: i64) -> Result<bool> {
        self.claim_attempt_impl(attempt_id, grader_id).await
    }

    async fn release_attempt(&self, attempt_id: i64, grader_id: i64) -> Result<bool> {
        self.release_attempt_impl(attempt_id, grader_id).await
    }

    async fn grade_response(&self, write: ResponseGradeWrite) -> Result<QuestionResponse> {
        self.grade_response_impl(write).await
    }

    async fn commit_grading(&self, commit: GradingCommit) -> Result<Grade> {
        self.commit_grading_impl(commit).await
    }

    async fn list_pending_grading(&self) -> Result<Vec<PendingGradingItem>> {
        self.list_pending_grading_impl().await
    }

    // 成绩模块
    async fn get_grade_by_attempt_id(&self, attempt_id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_attempt_id_impl(attempt_id).await
    }

    async fn list_grades_by_student(&self, user_id: i64) -> Result<Vec<StudentGradeItem>> {
        self.list_grades_by_student_impl(user_id).await
    }

    async fn list_grades_by_student_and_course(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Vec<Grade>> {
        self.list_grades_by_student_and_course_impl(user_id, course_id)
            .await
    }

    async fn list_grades_by_assessment(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<AssessmentGradeItem>> {
        self.list_grades_by_assessment_impl(assessment_id).await
    }

    // 统计模块
    async fn get_student_stats(&self, user_id: i64) -> Result<Option<StudentStats>> {
        self.get_student_stats_impl(user_id).await
    }

    async fn list_leaderboard(&self, limit: u64) -> Result<Vec<LeaderboardEntry>> {
        self.list_leaderboard_impl(limit).await
    }

    async fn get_content_analytics(
        &self,
        content_type: ContentType,
        content_id: i64,
    ) -> Result<Option<ContentAnalytics>> {
        self.get_content_analytics_impl(content_type, content_id)
            .await
    }

    async fn list_course_analytics(&self, course_id: i64) -> Result<Vec<ContentAnalytics>> {
        self.list_course_analytics_impl(course_id).await
    }
}

#[cfg(test)]
pub(crate) async fn memory_storage() -> SeaOrmStorage {
    SeaOrmStorage::connect(":memory:", 1, 5)
        .await
        .expect("内存数据库初始化失败")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("data/lms.db").unwrap(),
            "sqlite://data/lms.db?mode=rwc"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }

    #[tokio::test]
    async fn test_memory_storage_runs_migrations() {
        let storage = memory_storage().await;
        assert!(storage.get_user_by_id(1).await.unwrap().is_none());
    }
}
