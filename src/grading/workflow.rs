//! 人工评分流程
//!
//! submitted --claim--> grading --finalize--> graded
//! submitted --finalize--> graded
//! grading --release--> submitted

use chrono::Utc;
use tracing::info;

use super::{GradingInput, build_grading_commit, retry_on_conflict};
use crate::errors::{LmsError, Result};
use crate::models::attempts::entities::{Attempt, AttemptStatus, QuestionResponse};
use crate::models::attempts::responses::{FinalizeGradingResponse, PendingGradingItem};
use crate::models::users::entities::User;
use crate::storage::{ResponseGradeWrite, Storage};

/// 评分人须为已存在且未停用的导师或管理员
pub async fn require_grader(storage: &dyn Storage, grader_id: i64) -> Result<User> {
    match storage.get_user_by_id(grader_id).await? {
        Some(user) if !user.is_active => Err(LmsError::authorization(format!(
            "评分人 {grader_id} 已停用"
        ))),
        Some(user) if user.role.can_grade() => Ok(user),
        Some(user) => Err(LmsError::authorization(format!(
            "用户 {grader_id} 的角色为 {}，无评分权限",
            user.role
        ))),
        None => Err(LmsError::authorization(format!(
            "评分人 {grader_id} 不存在"
        ))),
    }
}

async fn load_attempt(storage: &dyn Storage, attempt_id: i64) -> Result<Attempt> {
    storage
        .get_attempt_by_id(attempt_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("作答 {attempt_id} 不存在")))
}

/// 检查评分人能否对当前状态的作答评分
fn ensure_gradable(attempt: &Attempt, grader_id: i64) -> Result<()> {
    match attempt.status {
        AttemptStatus::Submitted => Ok(()),
        AttemptStatus::Grading if attempt.claimed_by == Some(grader_id) => Ok(()),
        AttemptStatus::Grading => Err(LmsError::conflict(format!(
            "作答 {} 已被评分人 {} 认领",
            attempt.id,
            attempt.claimed_by.unwrap_or_default()
        ))),
        AttemptStatus::Graded => Err(LmsError::already_graded(format!(
            "作答 {} 已完成评分",
            attempt.id
        ))),
        AttemptStatus::InProgress => Err(LmsError::invalid_state(format!(
            "作答 {} 尚未提交",
            attempt.id
        ))),
    }
}

/// 待评分列表
pub async fn list_pending_grading(storage: &dyn Storage) -> Result<Vec<PendingGradingItem>> {
    storage.list_pending_grading().await
}

/// 认领作答，认领后只有认领人可以评分
pub async fn claim_grading(storage: &dyn Storage, attempt_id: i64, grader_id: i64) -> Result<Attempt> {
    require_grader(storage, grader_id).await?;
    let attempt = load_attempt(storage, attempt_id).await?;

    if !storage.claim_attempt(attempt_id, grader_id).await? {
        // 认领失败，按最新状态给出原因
        let current = load_attempt(storage, attempt_id).await?;
        ensure_gradable(&current, grader_id)?;
        if current.status == AttemptStatus::Submitted {
            return Err(LmsError::conflict(format!(
                "作答 {attempt_id} 状态在认领期间发生变化"
            )));
        }
        // 重复认领
        return Ok(current);
    }

    info!(
        "评分人 {grader_id} 认领作答 {attempt_id} (学生 {})",
        attempt.user_id
    );
    load_attempt(storage, attempt_id).await
}

/// 释放认领，作答回到 submitted
pub async fn release_grading(
    storage: &dyn Storage,
    attempt_id: i64,
    grader_id: i64,
) -> Result<Attempt> {
    require_grader(storage, grader_id).await?;
    let attempt = load_attempt(storage, attempt_id).await?;

    if !storage.release_attempt(attempt_id, grader_id).await? {
        let current = load_attempt(storage, attempt_id).await?;
        return Err(match current.status {
            AttemptStatus::Grading => LmsError::conflict(format!(
                "作答 {attempt_id} 由其他评分人认领，不能释放"
            )),
            status => LmsError::invalid_state(format!(
                "作答 {attempt_id} 当前状态为 {status}，未被认领"
            )),
        });
    }

    info!("评分人 {grader_id} 释放作答 {}", attempt.id);
    load_attempt(storage, attempt_id).await
}

/// 为单题打分
pub async fn grade_response(
    storage: &dyn Storage,
    response_id: i64,
    points_awarded: f64,
    feedback: Option<String>,
    grader_id: i64,
) -> Result<QuestionResponse> {
    require_grader(storage, grader_id).await?;

    let response = storage
        .get_response_by_id(response_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("题目作答 {response_id} 不存在")))?;
    let attempt = load_attempt(storage, response.attempt_id).await?;
    ensure_gradable(&attempt, grader_id)?;

    let question = storage
        .get_question_by_id(response.question_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("题目 {} 不存在", response.question_id)))?;

    if !points_awarded.is_finite() || points_awarded < 0.0 || points_awarded > question.points {
        return Err(LmsError::invalid_grade(format!(
            "得分 {points_awarded} 超出范围 [0, {}]",
            question.points
        )));
    }

    let graded = storage
        .grade_response(ResponseGradeWrite {
            response_id,
            attempt_id: attempt.id,
            allowed_statuses: vec![AttemptStatus::Submitted, AttemptStatus::Grading],
            points_awarded,
            feedback,
            graded_by: grader_id,
            graded_at: Utc::now(),
        })
        .await?;

    info!(
        "评分人 {grader_id} 为作答 {} 的题目 {} 打分 {points_awarded}/{}",
        attempt.id, question.id, question.points
    );
    Ok(graded)
}

/// 完成评分
///
/// 汇总全部题目得分，写入成绩并更新统计。已评分的作答返回 AlreadyGraded，
/// 保证同一作答只计入一次统计。
pub async fn finalize_grading(
    storage: &dyn Storage,
    attempt_id: i64,
    feedback: Option<String>,
    grader_id: i64,
) -> Result<FinalizeGradingResponse> {
    require_grader(storage, grader_id).await?;
    let feedback = feedback.as_deref();

    retry_on_conflict("完成评分", || {
        try_finalize(storage, attempt_id, feedback, grader_id)
    })
    .await
}

async fn try_finalize(
    storage: &dyn Storage,
    attempt_id: i64,
    feedback: Option<&str>,
    grader_id: i64,
) -> Result<FinalizeGradingResponse> {
    let attempt = load_attempt(storage, attempt_id).await?;
    ensure_gradable(&attempt, grader_id)?;

    let assessment = storage
        .get_assessment_by_id(attempt.assessment_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("测评 {} 不存在", attempt.assessment_id)))?;

    let responses = storage.list_responses(attempt_id).await?;

    let commit = build_grading_commit(
        storage,
        GradingInput {
            attempt: &attempt,
            assessment: &assessment,
            responses: &responses,
            feedback,
            graded_by: Some(grader_id),
            now: Utc::now(),
        },
    )
    .await?;
    let is_passed = commit.is_passed;

    let grade = storage.commit_grading(commit).await?;

    info!(
        "评分人 {grader_id} 完成作答 {attempt_id} 的评分: {}/{} ({:.1}%)",
        grade.score, grade.max_score, grade.percentage
    );

    Ok(FinalizeGradingResponse {
        attempt_id,
        total_score: grade.score,
        percentage: grade.percentage,
        is_passed,
        letter_grade: grade.letter_grade.unwrap_or_default(),
    })
}
