use super::*;
use crate::models::assessments::entities::{AssessmentType, QuestionKind, QuestionOption};
use crate::models::assessments::requests::{CreateAssessmentRequest, CreateQuestionRequest};
use crate::models::attempts::entities::AnswerPayload;
use crate::models::courses::entities::EnrollmentStatus;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::notes::requests::CreateNoteRequest;
use crate::models::resources::entities::{AccessAction, ResourceType};
use crate::models::resources::requests::CreateResourceRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UpdateProfileRequest};
use crate::errors::LmsError;
use crate::storage::Storage;
use crate::storage::sea_orm_storage::{SeaOrmStorage, memory_storage};

struct Fixture {
    storage: SeaOrmStorage,
    tutor: i64,
    student: i64,
    course: i64,
}

async fn create_user(storage: &SeaOrmStorage, email: &str, role: UserRole) -> i64 {
    storage
        .create_user(CreateUserRequest {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: email.split('@').next().unwrap_or_default().to_string(),
            role,
            student_id: None,
            department: None,
            title: None,
        })
        .await
        .unwrap()
        .id
}

async fn fixture() -> Fixture {
    let storage = memory_storage().await;
    let tutor = create_user(&storage, "tutor@example.com", UserRole::Tutor).await;
    let student = create_user(&storage, "alice@example.com", UserRole::Student).await;
    let course = storage
        .create_course(CreateCourseRequest {
            code: "CS101".to_string(),
            name: "Intro".to_string(),
            description: "Basics".to_string(),
            cover_image: None,
            created_by: tutor,
            start_date: None,
            end_date: None,
        })
        .await
        .unwrap()
        .id;
    Fixture {
        storage,
        tutor,
        student,
        course,
    }
}

impl Fixture {
    async fn assessment(&self, max_attempts: Option<i32>) -> i64 {
        self.storage
            .create_assessment(CreateAssessmentRequest {
                course_id: self.course,
                title: "Quiz 1".to_string(),
                description: None,
                assessment_type: AssessmentType::Quiz,
                total_points: 100.0,
                passing_score: Some(70.0),
                time_limit: None,
                max_attempts,
                shuffle_questions: false,
                show_correct_answers: false,
                available_from: None,
                available_until: None,
                created_by: self.tutor,
            })
            .await
            .unwrap()
            .id
    }

    async fn question(&self, assessment_id: i64, kind: QuestionKind, points: f64) -> i64 {
        self.storage
            .create_question(
                assessment_id,
                CreateQuestionRequest {
                    prompt: "Q".to_string(),
                    explanation: None,
                    points,
                    display_order: 1,
                    kind,
                },
            )
            .await
            .unwrap()
            .id
    }
}

fn choice() -> QuestionKind {
    QuestionKind::MultipleChoice {
        options: vec![
            QuestionOption {
                id: "a".to_string(),
                text: "3".to_string(),
                is_correct: false,
            },
            QuestionOption {
                id: "b".to_string(),
                text: "4".to_string(),
                is_correct: true,
            },
        ],
    }
}

fn written() -> QuestionKind {
    QuestionKind::Written { rubric: None }
}

fn pick(option_id: &str) -> AnswerPayload {
    AnswerPayload::SelectedOption {
        option_id: option_id.to_string(),
    }
}

fn essay() -> AnswerPayload {
    AnswerPayload::Text {
        text: "because".to_string(),
    }
}

#[tokio::test]
async fn test_attempt_limit_sequential() {
    let fx = fixture().await;
    let assessment = fx.assessment(Some(2)).await;

    let first = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    let second = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    assert_eq!(first.attempt_number, 1);
    assert_eq!(second.attempt_number, 2);

    let third = start_attempt(&fx.storage, assessment, fx.student).await;
    assert!(matches!(third, Err(LmsError::AttemptLimitExceeded(_))));
    assert_eq!(fx.storage.count_attempts(assessment, fx.student).await.unwrap(), 2);
}

#[tokio::test]
async fn test_attempt_limit_concurrent() {
    let fx = fixture().await;
    let assessment = fx.assessment(Some(1)).await;

    let (a, b) = tokio::join!(
        start_attempt(&fx.storage, assessment, fx.student),
        start_attempt(&fx.storage, assessment, fx.student)
    );

    let ok = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok, 1);
    assert!(
        matches!(a, Err(LmsError::AttemptLimitExceeded(_)))
            || matches!(b, Err(LmsError::AttemptLimitExceeded(_)))
    );
    assert_eq!(fx.storage.count_attempts(assessment, fx.student).await.unwrap(), 1);
}

#[tokio::test]
async fn test_start_attempt_requires_existing_records() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;

    assert!(matches!(
        start_attempt(&fx.storage, 999, fx.student).await,
        Err(LmsError::NotFound(_))
    ));
    assert!(matches!(
        start_attempt(&fx.storage, assessment, 999).await,
        Err(LmsError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_fully_auto_graded_submit() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, choice(), 100.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    let response = submit_response(&fx.storage, attempt.id, question, pick("b"))
        .await
        .unwrap();
    assert!(response.is_auto_graded);
    assert_eq!(response.is_correct, Some(true));
    assert_eq!(response.points_awarded, Some(100.0));

    let result = submit_attempt(&fx.storage, attempt.id).await.unwrap();
    assert_eq!(result.status, AttemptStatus::Graded);
    assert_eq!(result.percentage, Some(100.0));
    assert_eq!(result.is_passed, Some(true));

    let grade = fx
        .storage
        .get_grade_by_attempt_id(attempt.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(grade.score, 100.0);
    assert_eq!(grade.letter_grade.as_deref(), Some("A"));
    assert!(grade.is_final);
    assert_eq!(grade.recorded_by, None);

    let stats = fx.storage.get_student_stats(fx.student).await.unwrap().unwrap();
    assert_eq!(stats.total_assessments_completed, 1);
    assert_eq!(stats.average_score, 100.0);

    let analytics = fx
        .storage
        .get_content_analytics(ContentType::Assessment, assessment)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(analytics.total_completions, 1);
    assert_eq!(analytics.pass_rate, Some(100.0));
}

#[tokio::test]
async fn test_wrong_option_scores_zero() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, choice(), 100.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    submit_response(&fx.storage, attempt.id, question, pick("zzz"))
        .await
        .unwrap();

    let result = submit_attempt(&fx.storage, attempt.id).await.unwrap();
    assert_eq!(result.total_score, Some(0.0));
    assert_eq!(result.is_passed, Some(false));
}

#[tokio::test]
async fn test_resubmitting_answer_replaces_it() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, choice(), 100.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    submit_response(&fx.storage, attempt.id, question, pick("a"))
        .await
        .unwrap();
    let second = submit_response(&fx.storage, attempt.id, question, pick("b"))
        .await
        .unwrap();

    let responses = fx.storage.list_responses(attempt.id).await.unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].id, second.id);
    assert_eq!(responses[0].is_correct, Some(true));
}

#[tokio::test]
async fn test_submit_response_checks() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let other = fx.assessment(None).await;
    let question = fx.question(assessment, choice(), 100.0).await;
    let foreign = fx.question(other, choice(), 100.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();

    assert!(matches!(
        submit_response(&fx.storage, 999, question, pick("b")).await,
        Err(LmsError::NotFound(_))
    ));
    assert!(matches!(
        submit_response(&fx.storage, attempt.id, 999, pick("b")).await,
        Err(LmsError::NotFound(_))
    ));
    assert!(matches!(
        submit_response(&fx.storage, attempt.id, foreign, pick("b")).await,
        Err(LmsError::Validation(_))
    ));

    submit_attempt(&fx.storage, attempt.id).await.unwrap();
    assert!(matches!(
        submit_response(&fx.storage, attempt.id, question, pick("a")).await,
        Err(LmsError::InvalidState(_))
    ));
}

#[tokio::test]
async fn test_manual_grading_flow() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, written(), 100.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    let response = submit_response(&fx.storage, attempt.id, question, essay())
        .await
        .unwrap();
    assert!(!response.is_auto_graded);
    assert_eq!(response.points_awarded, None);

    let result = submit_attempt(&fx.storage, attempt.id).await.unwrap();
    assert_eq!(result.status, AttemptStatus::Submitted);
    assert!(
        fx.storage
            .get_grade_by_attempt_id(attempt.id)
            .await
            .unwrap()
            .is_none()
    );

    let pending = list_pending_grading(&fx.storage).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].attempt.id, attempt.id);
    assert_eq!(pending[0].course_code, "CS101");
    assert_eq!(pending[0].student.name, "Test alice");

    grade_response(&fx.storage, response.id, 65.0, Some("ok".into()), fx.tutor)
        .await
        .unwrap();
    let finalized = finalize_grading(&fx.storage, attempt.id, None, fx.tutor)
        .await
        .unwrap();
    assert_eq!(finalized.percentage, 65.0);
    assert!(!finalized.is_passed);
    assert_eq!(finalized.letter_grade, "D");

    let grade = fx
        .storage
        .get_grade_by_attempt_id(attempt.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(grade.recorded_by, Some(fx.tutor));
    assert!(list_pending_grading(&fx.storage).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_finalize_twice_is_rejected() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, written(), 100.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    submit_response(&fx.storage, attempt.id, question, essay())
        .await
        .unwrap();
    submit_attempt(&fx.storage, attempt.id).await.unwrap();

    finalize_grading(&fx.storage, attempt.id, None, fx.tutor)
        .await
        .unwrap();
    let again = finalize_grading(&fx.storage, attempt.id, None, fx.tutor).await;
    assert!(matches!(again, Err(LmsError::AlreadyGraded(_))));

    let stats = fx.storage.get_student_stats(fx.student).await.unwrap().unwrap();
    assert_eq!(stats.total_assessments_completed, 1);
}

#[tokio::test]
async fn test_finalize_rejects_in_progress() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();

    assert!(matches!(
        finalize_grading(&fx.storage, attempt.id, None, fx.tutor).await,
        Err(LmsError::InvalidState(_))
    ));
}

#[tokio::test]
async fn test_grade_bounds_and_grader_role() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, written(), 10.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    let response = submit_response(&fx.storage, attempt.id, question, essay())
        .await
        .unwrap();
    submit_attempt(&fx.storage, attempt.id).await.unwrap();

    for points in [-1.0, 10.5, f64::NAN] {
        assert!(matches!(
            grade_response(&fx.storage, response.id, points, None, fx.tutor).await,
            Err(LmsError::InvalidGrade(_))
        ));
    }
    assert!(matches!(
        grade_response(&fx.storage, response.id, 5.0, None, fx.student).await,
        Err(LmsError::Authorization(_))
    ));
    assert!(matches!(
        grade_response(&fx.storage, 999, 5.0, None, fx.tutor).await,
        Err(LmsError::NotFound(_))
    ));

    finalize_grading(&fx.storage, attempt.id, None, fx.tutor)
        .await
        .unwrap();
    assert!(matches!(
        grade_response(&fx.storage, response.id, 5.0, None, fx.tutor).await,
        Err(LmsError::AlreadyGraded(_))
    ));
}

#[tokio::test]
async fn test_grading_claim() {
    let fx = fixture().await;
    let other_tutor = create_user(&fx.storage, "bob@example.com", UserRole::Tutor).await;
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, written(), 100.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    let response = submit_response(&fx.storage, attempt.id, question, essay())
        .await
        .unwrap();
    submit_attempt(&fx.storage, attempt.id).await.unwrap();

    let claimed = claim_grading(&fx.storage, attempt.id, fx.tutor).await.unwrap();
    assert_eq!(claimed.status, AttemptStatus::Grading);
    assert_eq!(claimed.claimed_by, Some(fx.tutor));

    // 认领中的作答仍在待评分列表
    assert_eq!(list_pending_grading(&fx.storage).await.unwrap().len(), 1);

    assert!(matches!(
        claim_grading(&fx.storage, attempt.id, other_tutor).await,
        Err(LmsError::Conflict(_))
    ));
    assert!(matches!(
        grade_response(&fx.storage, response.id, 50.0, None, other_tutor).await,
        Err(LmsError::Conflict(_))
    ));
    assert!(matches!(
        finalize_grading(&fx.storage, attempt.id, None, other_tutor).await,
        Err(LmsError::Conflict(_))
    ));
    assert!(matches!(
        release_grading(&fx.storage, attempt.id, other_tutor).await,
        Err(LmsError::Conflict(_))
    ));

    grade_response(&fx.storage, response.id, 80.0, None, fx.tutor)
        .await
        .unwrap();
    let finalized = finalize_grading(&fx.storage, attempt.id, Some("good".into()), fx.tutor)
        .await
        .unwrap();
    assert!(finalized.is_passed);

    let attempt = fx.storage.get_attempt_by_id(attempt.id).await.unwrap().unwrap();
    assert_eq!(attempt.status, AttemptStatus::Graded);
    assert_eq!(attempt.claimed_by, None);
    assert_eq!(attempt.graded_by, Some(fx.tutor));
    assert_eq!(attempt.feedback.as_deref(), Some("good"));
}

#[tokio::test]
async fn test_release_returns_to_queue() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, written(), 100.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    submit_response(&fx.storage, attempt.id, question, essay())
        .await
        .unwrap();
    submit_attempt(&fx.storage, attempt.id).await.unwrap();

    claim_grading(&fx.storage, attempt.id, fx.tutor).await.unwrap();
    let released = release_grading(&fx.storage, attempt.id, fx.tutor).await.unwrap();
    assert_eq!(released.status, AttemptStatus::Submitted);
    assert_eq!(released.claimed_by, None);

    assert!(matches!(
        release_grading(&fx.storage, attempt.id, fx.tutor).await,
        Err(LmsError::InvalidState(_))
    ));
}

#[tokio::test]
async fn test_ungraded_manual_response_counts_as_zero() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let auto = fx.question(assessment, choice(), 40.0).await;
    let manual = fx.question(assessment, written(), 60.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    submit_response(&fx.storage, attempt.id, auto, pick("b"))
        .await
        .unwrap();
    submit_response(&fx.storage, attempt.id, manual, essay())
        .await
        .unwrap();
    submit_attempt(&fx.storage, attempt.id).await.unwrap();

    let finalized = finalize_grading(&fx.storage, attempt.id, None, fx.tutor)
        .await
        .unwrap();
    assert_eq!(finalized.total_score, 40.0);
    assert_eq!(finalized.percentage, 40.0);
}

#[tokio::test]
async fn test_average_score_is_mean_of_graded_attempts() {
    let fx = fixture().await;
    let percentages = [100.0, 50.0, 72.0];

    for points in percentages {
        let assessment = fx.assessment(None).await;
        let question = fx.question(assessment, written(), 100.0).await;
        let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
        let response = submit_response(&fx.storage, attempt.id, question, essay())
            .await
            .unwrap();
        submit_attempt(&fx.storage, attempt.id).await.unwrap();
        grade_response(&fx.storage, response.id, points, None, fx.tutor)
            .await
            .unwrap();
        finalize_grading(&fx.storage, attempt.id, None, fx.tutor)
            .await
            .unwrap();
    }

    let stats = fx.storage.get_student_stats(fx.student).await.unwrap().unwrap();
    let expected = percentages.iter().sum::<f64>() / percentages.len() as f64;
    assert_eq!(stats.total_assessments_completed, 3);
    assert!((stats.average_score - expected).abs() < 1e-9);
    assert_eq!(stats.highest_score, 100.0);
}

#[tokio::test]
async fn test_concurrent_finalize_counts_once() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, written(), 100.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    submit_response(&fx.storage, attempt.id, question, essay())
        .await
        .unwrap();
    submit_attempt(&fx.storage, attempt.id).await.unwrap();

    let (a, b) = tokio::join!(
        finalize_grading(&fx.storage, attempt.id, None, fx.tutor),
        finalize_grading(&fx.storage, attempt.id, None, fx.tutor)
    );
    assert_eq!([&a, &b].iter().filter(|r| r.is_ok()).count(), 1);

    let stats = fx.storage.get_student_stats(fx.student).await.unwrap().unwrap();
    assert_eq!(stats.total_assessments_completed, 1);
}

#[tokio::test]
async fn test_missing_stats_row_is_created_lazily() {
    let fx = fixture().await;
    // 导师没有统计行
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, choice(), 100.0).await;
    assert!(fx.storage.get_student_stats(fx.tutor).await.unwrap().is_none());

    let attempt = start_attempt(&fx.storage, assessment, fx.tutor).await.unwrap();
    submit_response(&fx.storage, attempt.id, question, pick("b"))
        .await
        .unwrap();
    submit_attempt(&fx.storage, attempt.id).await.unwrap();

    let stats = fx.storage.get_student_stats(fx.tutor).await.unwrap().unwrap();
    assert_eq!(stats.total_assessments_completed, 1);
    assert_eq!(stats.current_streak, 1);
}

#[tokio::test]
async fn test_note_views_update_analytics() {
    let fx = fixture().await;
    let bob = create_user(&fx.storage, "bob@example.com", UserRole::Student).await;
    let note = fx
        .storage
        .create_note(CreateNoteRequest {
            course_id: fx.course,
            title: "Week 1".to_string(),
            content: "# Hello".to_string(),
            display_order: 1,
            created_by: fx.tutor,
            is_published: true,
            is_visible_to_students: true,
            publish_at: None,
            expires_at: None,
        })
        .await
        .unwrap();

    record_note_view(&fx.storage, note.id, fx.student, Some(60))
        .await
        .unwrap();
    record_note_view(&fx.storage, note.id, fx.student, Some(120))
        .await
        .unwrap();
    record_note_view(&fx.storage, note.id, bob, None).await.unwrap();

    let analytics = fx
        .storage
        .get_content_analytics(ContentType::Note, note.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(analytics.total_views, 3);
    assert_eq!(analytics.unique_viewers, 2);
    assert_eq!(analytics.average_time_spent, Some(90.0));
    assert_eq!(fx.storage.count_note_views(note.id).await.unwrap(), (3, 2));

    let stats = fx.storage.get_student_stats(fx.student).await.unwrap().unwrap();
    assert_eq!(stats.total_notes_viewed, 2);
    assert_eq!(stats.total_time_spent, 180);

    assert!(matches!(
        record_note_view(&fx.storage, note.id, fx.student, Some(-5)).await,
        Err(LmsError::Validation(_))
    ));
}

#[tokio::test]
async fn test_enrollment_and_completion() {
    let fx = fixture().await;

    enroll_student(&fx.storage, fx.course, fx.student).await.unwrap();
    match enroll_student(&fx.storage, fx.course, fx.student).await {
        Err(LmsError::Conflict(msg)) => assert!(msg.contains("已选修")),
        other => panic!("expected duplicate enrollment conflict, got {other:?}"),
    }
    assert!(matches!(
        enroll_student(&fx.storage, fx.course, fx.tutor).await,
        Err(LmsError::Validation(_))
    ));

    let half = update_progress(&fx.storage, fx.course, fx.student, 50.0)
        .await
        .unwrap();
    assert_eq!(half.status, EnrollmentStatus::Active);

    let done = update_progress(&fx.storage, fx.course, fx.student, 100.0)
        .await
        .unwrap();
    assert_eq!(done.status, EnrollmentStatus::Completed);
    assert!(done.completed_at.is_some());

    // 再次到 100 不重复计数
    update_progress(&fx.storage, fx.course, fx.student, 100.0)
        .await
        .unwrap();

    let stats = fx.storage.get_student_stats(fx.student).await.unwrap().unwrap();
    assert_eq!(stats.total_courses_enrolled, 1);
    assert_eq!(stats.total_courses_completed, 1);

    assert!(matches!(
        update_progress(&fx.storage, fx.course, fx.student, 120.0).await,
        Err(LmsError::Validation(_))
    ));
}

#[tokio::test]
async fn test_retry_on_conflict_only_retries_conflicts() {
    use std::sync::atomic::{AtomicU32, Ordering};

    let calls = AtomicU32::new(0);
    let result: crate::errors::Result<()> = retry_on_conflict("测试", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(LmsError::conflict("写入冲突"))
    })
    .await;
    assert!(matches!(result, Err(LmsError::Conflict(_))));
    assert_eq!(calls.load(Ordering::SeqCst), MAX_COMMIT_RETRIES + 1);

    let calls = AtomicU32::new(0);
    let result: crate::errors::Result<()> = retry_on_conflict("测试", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(LmsError::validation("参数错误"))
    })
    .await;
    assert!(matches!(result, Err(LmsError::Validation(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_leaderboard_ranks_every_stats_row() {
    let fx = fixture().await;
    let idle = create_user(&fx.storage, "bob@example.com", UserRole::Student).await;
    let assessment = fx.assessment(None).await;
    let question = fx.question(assessment, choice(), 100.0).await;

    let attempt = start_attempt(&fx.storage, assessment, fx.student).await.unwrap();
    submit_response(&fx.storage, attempt.id, question, pick("a"))
        .await
        .unwrap();
    submit_attempt(&fx.storage, attempt.id).await.unwrap();

    // 未完成测评的学生同样上榜，平均分并列时完成数多者在前
    let board = fx.storage.list_leaderboard(10).await.unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].user_id, fx.student);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[1].user_id, idle);
    assert_eq!(board[1].rank, 2);
    assert_eq!(board[1].total_assessments_completed, 0);
}

#[tokio::test]
async fn test_deactivated_users_are_rejected() {
    let fx = fixture().await;
    let assessment = fx.assessment(None).await;
    fx.question(assessment, choice(), 10.0).await;

    let updated = fx
        .storage
        .update_user_profile(
            fx.student,
            UpdateProfileRequest {
                title: Some("Ms".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title.as_deref(), Some("Ms"));
    assert_eq!(updated.first_name, "Test");

    let student = fx.storage.deactivate_user(fx.student).await.unwrap().unwrap();
    assert!(!student.is_active);

    assert!(matches!(
        start_attempt(&fx.storage, assessment, fx.student).await,
        Err(LmsError::Authorization(_))
    ));
    assert!(matches!(
        enroll_student(&fx.storage, fx.course, fx.student).await,
        Err(LmsError::Authorization(_))
    ));
    assert_eq!(fx.storage.count_attempts(assessment, fx.student).await.unwrap(), 0);

    assert!(require_grader(&fx.storage, fx.tutor).await.is_ok());
    fx.storage.deactivate_user(fx.tutor).await.unwrap();
    assert!(matches!(
        require_grader(&fx.storage, fx.tutor).await,
        Err(LmsError::Authorization(_))
    ));

    assert!(fx.storage.deactivate_user(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_resource_access_updates_analytics() {
    let fx = fixture().await;
    let bob = create_user(&fx.storage, "bob@example.com", UserRole::Student).await;

    let resource = fx
        .storage
        .create_resource(CreateResourceRequest {
            course_id: fx.course,
            title: "Lecture video".to_string(),
            description: None,
            resource_type: ResourceType::Video,
            url: "https://example.com/lecture-1".to_string(),
            category: Some("lectures".to_string()),
            display_order: 0,
            created_by: fx.tutor,
            available_from: None,
            expires_at: None,
        })
        .await
        .unwrap();
    assert!(!resource.is_published);
    assert!(!resource.is_visible_to_students);

    let access = record_resource_access(&fx.storage, resource.id, fx.student, AccessAction::View)
        .await
        .unwrap();
    assert_eq!(access.action, AccessAction::View);
    record_resource_access(&fx.storage, resource.id, fx.student, AccessAction::Download)
        .await
        .unwrap();
    record_resource_access(&fx.storage, resource.id, bob, AccessAction::View)
        .await
        .unwrap();

    let analytics = fx
        .storage
        .get_content_analytics(ContentType::Resource, resource.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(analytics.course_id, fx.course);
    assert_eq!(analytics.total_views, 3);
    assert_eq!(analytics.unique_viewers, 2);
    assert_eq!(analytics.average_time_spent, None);

    // 资源访问不计入学生统计
    let stats = fx.storage.get_student_stats(fx.student).await.unwrap().unwrap();
    assert_eq!(stats.total_notes_viewed, 0);

    assert!(matches!(
        record_resource_access(&fx.storage, 9999, fx.student, AccessAction::View).await,
        Err(LmsError::NotFound(_))
    ));

    assert!(fx.storage.delete_resource(resource.id).await.unwrap());
    assert!(
        fx.storage
            .get_content_analytics(ContentType::Resource, resource.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(!fx.storage.has_accessed_resource(resource.id, fx.student).await.unwrap());
}
