use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::ProfileImage).string().null())
                    .col(ColumnDef::new(Users::StudentId).string().null())
                    .col(ColumnDef::new(Users::Department).string().null())
                    .col(ColumnDef::new(Users::Title).string().null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::EnrollmentDate).big_integer().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(ColumnDef::new(Courses::CoverImage).string().null())
                    .col(
                        ColumnDef::new(Courses::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Courses::IsArchived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Courses::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Courses::StartDate).big_integer().null())
                    .col(ColumnDef::new(Courses::EndDate).big_integer().null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选课表
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Enrollments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::Progress)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Enrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Enrollments::CompletedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建笔记表
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notes::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Notes::Title).string().not_null())
                    .col(ColumnDef::new(Notes::Content).text().not_null())
                    .col(ColumnDef::new(Notes::DisplayOrder).integer().not_null())
                    .col(
                        ColumnDef::new(Notes::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notes::IsVisibleToStudents)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notes::PublishAt).big_integer().null())
                    .col(ColumnDef::new(Notes::ExpiresAt).big_integer().null())
                    .col(ColumnDef::new(Notes::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Notes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Notes::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notes::Table, Notes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建笔记浏览记录表
        manager
            .create_table(
                Table::create()
                    .table(NoteViews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NoteViews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NoteViews::NoteId).big_integer().not_null())
                    .col(ColumnDef::new(NoteViews::UserId).big_integer().not_null())
                    .col(ColumnDef::new(NoteViews::ViewedAt).big_integer().not_null())
                    .col(ColumnDef::new(NoteViews::Duration).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(NoteViews::Table, NoteViews::NoteId)
                            .to(Notes::Table, Notes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(NoteViews::Table, NoteViews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建测评表
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assessments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::Title).string().not_null())
                    .col(ColumnDef::new(Assessments::Description).text().null())
                    .col(
                        ColumnDef::new(Assessments::AssessmentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::TotalPoints)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::PassingScore).double().null())
                    .col(ColumnDef::new(Assessments::TimeLimit).integer().null())
                    .col(ColumnDef::new(Assessments::MaxAttempts).integer().null())
                    .col(
                        ColumnDef::new(Assessments::ShuffleQuestions)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::ShowCorrectAnswers)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::IsVisibleToStudents)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::AvailableFrom)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::AvailableUntil)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Questions::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Questions::QuestionType).string().not_null())
                    .col(ColumnDef::new(Questions::Prompt).text().not_null())
                    .col(ColumnDef::new(Questions::Explanation).text().null())
                    .col(ColumnDef::new(Questions::Points).double().not_null())
                    .col(ColumnDef::new(Questions::DisplayOrder).integer().not_null())
                    .col(ColumnDef::new(Questions::Options).text().null())
                    .col(ColumnDef::new(Questions::Rubric).text().null())
                    .col(ColumnDef::new(Questions::AllowedFileTypes).text().null())
                    .col(ColumnDef::new(Questions::MaxFileSize).big_integer().null())
                    .col(ColumnDef::new(Questions::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Questions::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::AssessmentId)
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作答记录表
        manager
            .create_table(
                Table::create()
                    .table(AssessmentAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssessmentAttempts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::AttemptNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::StartedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::SubmittedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::TotalScore)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::Percentage)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(AssessmentAttempts::IsPassed).boolean().null())
                    .col(
                        ColumnDef::new(AssessmentAttempts::ClaimedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::GradedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::GradedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(AssessmentAttempts::Feedback).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssessmentAttempts::Table, AssessmentAttempts::AssessmentId)
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssessmentAttempts::Table, AssessmentAttempts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目作答表
        manager
            .create_table(
                Table::create()
                    .table(QuestionResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionResponses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuestionResponses::AttemptId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionResponses::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionResponses::SelectedOptionId)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(QuestionResponses::TextResponse).text().null())
                    .col(ColumnDef::new(QuestionResponses::FileRef).string().null())
                    .col(
                        ColumnDef::new(QuestionResponses::IsAutoGraded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(QuestionResponses::IsCorrect).boolean().null())
                    .col(
                        ColumnDef::new(QuestionResponses::PointsAwarded)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(QuestionResponses::Feedback).text().null())
                    .col(
                        ColumnDef::new(QuestionResponses::GradedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(QuestionResponses::GradedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(QuestionResponses::AnsweredAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuestionResponses::Table, QuestionResponses::AttemptId)
                            .to(AssessmentAttempts::Table, AssessmentAttempts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuestionResponses::Table, QuestionResponses::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::AssessmentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Grades::AttemptId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Grades::Score).double().not_null())
                    .col(ColumnDef::new(Grades::MaxScore).double().not_null())
                    .col(ColumnDef::new(Grades::Percentage).double().not_null())
                    .col(ColumnDef::new(Grades::LetterGrade).string().null())
                    .col(
                        ColumnDef::new(Grades::IsFinal)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Grades::RecordedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::RecordedBy).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::AttemptId)
                            .to(AssessmentAttempts::Table, AssessmentAttempts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生统计表
        manager
            .create_table(
                Table::create()
                    .table(StudentStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentStats::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentStats::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StudentStats::TotalCoursesEnrolled)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentStats::TotalCoursesCompleted)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentStats::TotalAssessmentsCompleted)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentStats::TotalNotesViewed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentStats::TotalTimeSpent)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentStats::AverageScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(StudentStats::HighestScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(StudentStats::CurrentStreak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentStats::LongestStreak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentStats::LastActivityAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentStats::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentStats::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentStats::Table, StudentStats::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建内容分析表
        manager
            .create_table(
                Table::create()
                    .table(ContentAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentAnalytics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContentAnalytics::ContentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentAnalytics::ContentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentAnalytics::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentAnalytics::TotalViews)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ContentAnalytics::UniqueViewers)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ContentAnalytics::TotalCompletions)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ContentAnalytics::TotalPassed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ContentAnalytics::AverageScore).double().null())
                    .col(ColumnDef::new(ContentAnalytics::PassRate).double().null())
                    .col(
                        ColumnDef::new(ContentAnalytics::AverageTimeSpent)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ContentAnalytics::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 唯一约束：同一学生同一测评的作答序号不可重复
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attempts_assessment_user_number")
                    .table(AssessmentAttempts::Table)
                    .col(AssessmentAttempts::AssessmentId)
                    .col(AssessmentAttempts::UserId)
                    .col(AssessmentAttempts::AttemptNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attempts_status")
                    .table(AssessmentAttempts::Table)
                    .col(AssessmentAttempts::Status)
                    .to_owned(),
            )
            .await?;

        // 唯一约束：每次作答中每道题只保留一条答案
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_responses_attempt_question")
                    .table(QuestionResponses::Table)
                    .col(QuestionResponses::AttemptId)
                    .col(QuestionResponses::QuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_enrollments_user_course")
                    .table(Enrollments::Table)
                    .col(Enrollments::UserId)
                    .col(Enrollments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_content_analytics_content")
                    .table(ContentAnalytics::Table)
                    .col(ContentAnalytics::ContentType)
                    .col(ContentAnalytics::ContentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_content_analytics_course_id")
                    .table(ContentAnalytics::Table)
                    .col(ContentAnalytics::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_note_views_note_user")
                    .table(NoteViews::Table)
                    .col(NoteViews::NoteId)
                    .col(NoteViews::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_user_course")
                    .table(Grades::Table)
                    .col(Grades::UserId)
                    .col(Grades::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ContentAnalytics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentStats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuestionResponses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssessmentAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NoteViews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    FirstName,
    LastName,
    Role,
    ProfileImage,
    StudentId,
    Department,
    Title,
    IsActive,
    EnrollmentDate,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Code,
    Name,
    Description,
    CoverImage,
    IsPublished,
    IsArchived,
    CreatedBy,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
    UserId,
    CourseId,
    Progress,
    Status,
    EnrolledAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum Notes {
    #[sea_orm(iden = "notes")]
    Table,
    Id,
    CourseId,
    Title,
    Content,
    DisplayOrder,
    IsPublished,
    IsVisibleToStudents,
    PublishAt,
    ExpiresAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum NoteViews {
    #[sea_orm(iden = "note_views")]
    Table,
    Id,
    NoteId,
    UserId,
    ViewedAt,
    Duration,
}

#[derive(DeriveIden)]
enum Assessments {
    #[sea_orm(iden = "assessments")]
    Table,
    Id,
    CourseId,
    Title,
    Description,
    AssessmentType,
    TotalPoints,
    PassingScore,
    TimeLimit,
    MaxAttempts,
    ShuffleQuestions,
    ShowCorrectAnswers,
    IsPublished,
    IsVisibleToStudents,
    AvailableFrom,
    AvailableUntil,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    AssessmentId,
    QuestionType,
    Prompt,
    Explanation,
    Points,
    DisplayOrder,
    Options,
    Rubric,
    AllowedFileTypes,
    MaxFileSize,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AssessmentAttempts {
    #[sea_orm(iden = "assessment_attempts")]
    Table,
    Id,
    AssessmentId,
    UserId,
    AttemptNumber,
    Status,
    StartedAt,
    SubmittedAt,
    TotalScore,
    Percentage,
    IsPassed,
    ClaimedBy,
    GradedBy,
    GradedAt,
    Feedback,
}

#[derive(DeriveIden)]
enum QuestionResponses {
    #[sea_orm(iden = "question_responses")]
    Table,
    Id,
    AttemptId,
    QuestionId,
    SelectedOptionId,
    TextResponse,
    FileRef,
    IsAutoGraded,
    IsCorrect,
    PointsAwarded,
    Feedback,
    GradedBy,
    GradedAt,
    AnsweredAt,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    UserId,
    CourseId,
    AssessmentId,
    AttemptId,
    Score,
    MaxScore,
    Percentage,
    LetterGrade,
    IsFinal,
    RecordedAt,
    RecordedBy,
}

#[derive(DeriveIden)]
enum StudentStats {
    #[sea_orm(iden = "student_stats")]
    Table,
    Id,
    UserId,
    TotalCoursesEnrolled,
    TotalCoursesCompleted,
    TotalAssessmentsCompleted,
    TotalNotesViewed,
    TotalTimeSpent,
    AverageScore,
    HighestScore,
    CurrentStreak,
    LongestStreak,
    LastActivityAt,
    Version,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContentAnalytics {
    #[sea_orm(iden = "content_analytics")]
    Table,
    Id,
    ContentType,
    ContentId,
    CourseId,
    TotalViews,
    UniqueViewers,
    TotalCompletions,
    TotalPassed,
    AverageScore,
    PassRate,
    AverageTimeSpent,
    UpdatedAt,
}
