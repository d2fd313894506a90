//! 作答生命周期：开始、逐题作答、提交

use chrono::Utc;
use tracing::info;

use super::{GradingInput, build_grading_commit, retry_on_conflict, scoring};
use crate::errors::{LmsError, Result};
use crate::models::assessments::entities::Assessment;
use crate::models::attempts::entities::{AnswerPayload, Attempt, AttemptStatus, QuestionResponse};
use crate::models::attempts::responses::SubmitAttemptResponse;
use crate::storage::{ResponseUpsert, Storage};

/// 开始一次作答
///
/// 序号为已有作答数 + 1。两个请求同时拿到相同序号时唯一索引拒绝后到者，
/// 重试时重新计数，因此上限在并发下同样成立。
pub async fn start_attempt(
    storage: &dyn Storage,
    assessment_id: i64,
    user_id: i64,
) -> Result<Attempt> {
    let assessment = storage
        .get_assessment_by_id(assessment_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("测评 {assessment_id} 不存在")))?;

    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("用户 {user_id} 不存在")))?;
    if !user.is_active {
        return Err(LmsError::authorization(format!("用户 {user_id} 已停用")));
    }

    retry_on_conflict("开始作答", || try_start(storage, &assessment, user_id)).await
}

async fn try_start(storage: &dyn Storage, assessment: &Assessment, user_id: i64) -> Result<Attempt> {
    let prior = storage.count_attempts(assessment.id, user_id).await?;

    if let Some(max) = assessment.max_attempts
        && prior >= max as i64
    {
        return Err(LmsError::attempt_limit_exceeded(format!(
            "测评 {} 最多允许作答 {max} 次",
            assessment.id
        )));
    }

    let attempt = storage
        .create_attempt(assessment.id, user_id, (prior + 1) as i32, Utc::now())
        .await?;

    info!(
        "学生 {} 开始测评 {} 的第 {} 次作答 (attempt_id={})",
        user_id, assessment.id, attempt.attempt_number, attempt.id
    );
    Ok(attempt)
}

/// 提交单题答案
///
/// 选择类题目立即判分；同一题重复提交覆盖之前的答案。
pub async fn submit_response(
    storage: &dyn Storage,
    attempt_id: i64,
    question_id: i64,
    answer: AnswerPayload,
) -> Result<QuestionResponse> {
    let attempt = storage
        .get_attempt_by_id(attempt_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("作答 {attempt_id} 不存在")))?;

    if attempt.status != AttemptStatus::InProgress {
        return Err(LmsError::invalid_state(format!(
            "作答 {attempt_id} 当前状态为 {}，不能再提交答案",
            attempt.status
        )));
    }

    let question = storage
        .get_question_by_id(question_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("题目 {question_id} 不存在")))?;

    if question.assessment_id != attempt.assessment_id {
        return Err(LmsError::validation(format!(
            "题目 {question_id} 不属于测评 {}",
            attempt.assessment_id
        )));
    }

    let score = scoring::score_response(&question, &answer);
    let upsert = ResponseUpsert {
        attempt_id,
        question_id,
        answer,
        is_auto_graded: score.is_auto_graded,
        is_correct: score.is_correct,
        points_awarded: score.points_awarded,
        answered_at: Utc::now(),
    };

    retry_on_conflict("提交答案", || storage.upsert_response(upsert.clone())).await
}

/// 提交整份作答
///
/// 存在需人工评分的题目时进入 submitted 等待评分；否则直接完成评分并写入成绩。
pub async fn submit_attempt(storage: &dyn Storage, attempt_id: i64) -> Result<SubmitAttemptResponse> {
    retry_on_conflict("提交作答", || try_submit(storage, attempt_id)).await
}

async fn try_submit(storage: &dyn Storage, attempt_id: i64) -> Result<SubmitAttemptResponse> {
    let attempt = storage
        .get_attempt_by_id(attempt_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("作答 {attempt_id} 不存在")))?;

    match attempt.status {
        AttemptStatus::InProgress => {}
        AttemptStatus::Graded => {
            return Err(LmsError::already_graded(format!(
                "作答 {attempt_id} 已完成评分"
            )));
        }
        status => {
            return Err(LmsError::invalid_state(format!(
                "作答 {attempt_id} 已提交，当前状态为 {status}"
            )));
        }
    }

    let assessment = storage
        .get_assessment_by_id(attempt.assessment_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("测评 {} 不存在", attempt.assessment_id)))?;

    let responses = storage.list_responses(attempt_id).await?;
    let now = Utc::now();

    if scoring::needs_manual_grading(&responses) {
        storage.mark_attempt_submitted(attempt_id, now).await?;
        info!("作答 {attempt_id} 含主观题，已进入人工评分队列");
        return Ok(SubmitAttemptResponse {
            attempt_id,
            status: AttemptStatus::Submitted,
            total_score: None,
            percentage: None,
            is_passed: None,
        });
    }

    let commit = build_grading_commit(
        storage,
        GradingInput {
            attempt: &attempt,
            assessment: &assessment,
            responses: &responses,
            feedback: None,
            graded_by: None,
            now,
        },
    )
    .await?;
    let (total_score, percentage, is_passed) =
        (commit.total_score, commit.percentage, commit.is_passed);

    storage.commit_grading(commit).await?;

    info!(
        "作答 {attempt_id} 已自动评分: {total_score}/{} ({percentage:.1}%)，{}",
        assessment.total_points,
        if is_passed { "通过" } else { "未通过" }
    );

    Ok(SubmitAttemptResponse {
        attempt_id,
        status: AttemptStatus::Graded,
        total_score: Some(total_score),
        percentage: Some(percentage),
        is_passed: Some(is_passed),
    })
}
