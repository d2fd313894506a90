//! 测评作答与评分引擎
//!
//! 所有操作只通过注入的 `&dyn Storage` 读写，不持有任何跨调用状态。
//! 多表写入由存储层在单个事务中提交；并发冲突（唯一索引或比较并交换失败）
//! 时重新读取并重试，最多 `MAX_COMMIT_RETRIES` 次。

pub mod activity;
pub mod analytics;
pub mod attempts;
pub mod scoring;
pub mod workflow;

#[cfg(test)]
mod tests;

use std::future::Future;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::models::assessments::entities::Assessment;
use crate::models::attempts::entities::{Attempt, AttemptStatus, QuestionResponse};
use crate::models::stats::entities::{ContentAnalytics, ContentType, StudentStats};
use crate::storage::{AnalyticsWrite, GradingCommit, NewGrade, StatsWrite, Storage};

pub use activity::{enroll_student, record_note_view, record_resource_access, update_progress};
pub use attempts::{start_attempt, submit_attempt, submit_response};
pub use workflow::{
    claim_grading, finalize_grading, grade_response, list_pending_grading, release_grading,
    require_grader,
};

/// 冲突重试次数上限
pub const MAX_COMMIT_RETRIES: u32 = 3;

/// 遇到 Conflict 时重新执行整个读-算-写过程
pub(crate) async fn retry_on_conflict<T, F, Fut>(operation: &str, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retries = 0;
    loop {
        match f().await {
            Err(e) if e.is_conflict() && retries < MAX_COMMIT_RETRIES => {
                retries += 1;
                warn!("{operation}发生并发冲突，第 {retries} 次重试: {e}");
            }
            other => return other,
        }
    }
}

/// 读取学生统计，不存在时以全零统计为基础并在提交时插入
pub(crate) async fn load_stats(
    storage: &dyn Storage,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<(Option<i32>, StudentStats)> {
    match storage.get_student_stats(user_id).await? {
        Some(stats) => Ok((Some(stats.version), stats)),
        None => {
            debug!("学生 {user_id} 尚无统计行，将在本次提交中创建");
            Ok((None, StudentStats::empty(user_id, now)))
        }
    }
}

/// 读取内容分析，返回 (旧值, 计算基础)
pub(crate) async fn load_analytics(
    storage: &dyn Storage,
    content_type: ContentType,
    content_id: i64,
    course_id: i64,
    now: DateTime<Utc>,
) -> Result<(Option<ContentAnalytics>, ContentAnalytics)> {
    let previous = storage
        .get_content_analytics(content_type, content_id)
        .await?;
    let base = match &previous {
        Some(row) => row.clone(),
        None => {
            debug!(
                "{} {content_id} 尚无分析行，将在本次提交中创建",
                content_type.as_str()
            );
            ContentAnalytics::empty(content_type, content_id, course_id, now)
        }
    };
    Ok((previous, base))
}

/// 作答进入 graded 所需的输入
pub(crate) struct GradingInput<'a> {
    pub attempt: &'a Attempt,
    pub assessment: &'a Assessment,
    pub responses: &'a [QuestionResponse],
    pub feedback: Option<&'a str>,
    pub graded_by: Option<i64>,
    pub now: DateTime<Utc>,
}

/// 计算总分并组装评分提交
///
/// 期望状态取自读到的作答，提交时据此做比较并交换。
pub(crate) async fn build_grading_commit(
    storage: &dyn Storage,
    input: GradingInput<'_>,
) -> Result<GradingCommit> {
    let GradingInput {
        attempt,
        assessment,
        responses,
        feedback,
        graded_by,
        now,
    } = input;

    let (total_score, ungraded) = scoring::sum_points(responses);
    if ungraded > 0 {
        warn!(
            "作答 {} 有 {ungraded} 道题未评分，按 0 分计入",
            attempt.id
        );
    }
    let percentage = scoring::percentage(total_score, assessment.total_points);
    let is_passed = scoring::is_passed(percentage, assessment.passing_score);

    let (expected_version, stats_base) = load_stats(storage, attempt.user_id, now).await?;
    let (previous, analytics_base) = load_analytics(
        storage,
        ContentType::Assessment,
        assessment.id,
        assessment.course_id,
        now,
    )
    .await?;

    Ok(GradingCommit {
        attempt_id: attempt.id,
        expected_status: attempt.status,
        expected_claimed_by: match attempt.status {
            AttemptStatus::Grading => attempt.claimed_by,
            _ => None,
        },
        submitted_at: match attempt.status {
            AttemptStatus::InProgress => Some(now),
            _ => None,
        },
        total_score,
        percentage,
        is_passed,
        feedback: feedback.map(str::to_string),
        graded_by,
        graded_at: now,
        grade: NewGrade {
            user_id: attempt.user_id,
            course_id: assessment.course_id,
            assessment_id: assessment.id,
            score: total_score,
            max_score: assessment.total_points,
            percentage,
            letter_grade: scoring::letter_grade(percentage).to_string(),
            recorded_by: graded_by,
        },
        stats: StatsWrite {
            expected_version,
            stats: analytics::apply_graded_attempt(&stats_base, percentage, now),
        },
        analytics: AnalyticsWrite {
            previous,
            analytics: analytics::apply_assessment_completion(
                &analytics_base,
                percentage,
                is_passed,
                now,
            ),
        },
    })
}
