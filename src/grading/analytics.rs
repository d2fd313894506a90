//! 学生统计与内容分析的聚合计算
//!
//! 写路径：由旧值计算新值，交给存储层做比较并交换提交。
//! 读路径：将查询结果汇总为课程/测评维度的报表。

use chrono::{DateTime, Utc};

use super::scoring::incremental_mean;
use crate::models::assessments::responses::AssessmentStats;
use crate::models::attempts::entities::{Attempt, AttemptStatus};
use crate::models::grades::entities::Grade;
use crate::models::grades::responses::CourseGradeSummary;
use crate::models::stats::entities::{ContentAnalytics, ContentType, StudentStats};
use crate::models::stats::responses::{
    AssessmentAnalyticsGroup, CourseAnalytics, NoteAnalyticsGroup, ResourceAnalyticsGroup,
};

/// 按 UTC 日期更新连续活跃天数
fn touch_activity(stats: &mut StudentStats, now: DateTime<Utc>) {
    let today = now.date_naive();
    let last_day = stats.last_activity_at.date_naive();

    stats.current_streak = if last_day == today {
        stats.current_streak.max(1)
    } else if last_day.succ_opt() == Some(today) {
        stats.current_streak + 1
    } else {
        1
    };
    stats.longest_streak = stats.longest_streak.max(stats.current_streak);
    stats.last_activity_at = now;
    stats.updated_at = now;
}

/// 作答进入 graded 后的学生统计
pub fn apply_graded_attempt(
    stats: &StudentStats,
    percentage: f64,
    now: DateTime<Utc>,
) -> StudentStats {
    let mut next = stats.clone();
    next.average_score = incremental_mean(
        stats.average_score,
        stats.total_assessments_completed as i64,
        percentage,
    );
    next.total_assessments_completed += 1;
    next.highest_score = stats.highest_score.max(percentage);
    touch_activity(&mut next, now);
    next
}

/// 浏览笔记后的学生统计
pub fn apply_note_view(
    stats: &StudentStats,
    duration: Option<i64>,
    now: DateTime<Utc>,
) -> StudentStats {
    let mut next = stats.clone();
    next.total_notes_viewed += 1;
    if let Some(seconds) = duration.filter(|d| *d > 0) {
        next.total_time_spent += seconds;
    }
    touch_activity(&mut next, now);
    next
}

pub fn apply_enrollment(stats: &StudentStats, now: DateTime<Utc>) -> StudentStats {
    let mut next = stats.clone();
    next.total_courses_enrolled += 1;
    next.updated_at = now;
    next
}

pub fn apply_course_completion(stats: &StudentStats, now: DateTime<Utc>) -> StudentStats {
    let mut next = stats.clone();
    next.total_courses_completed += 1;
    next.updated_at = now;
    next
}

/// 测评完成一次后的内容分析
pub fn apply_assessment_completion(
    analytics: &ContentAnalytics,
    percentage: f64,
    passed: bool,
    now: DateTime<Utc>,
) -> ContentAnalytics {
    let mut next = analytics.clone();
    let completions = analytics.total_completions as i64;
    next.average_score = Some(incremental_mean(
        analytics.average_score.unwrap_or(0.0),
        completions,
        percentage,
    ));
    next.total_completions += 1;
    if passed {
        next.total_passed += 1;
    }
    next.pass_rate = Some(next.total_passed as f64 / next.total_completions as f64 * 100.0);
    next.updated_at = now;
    next
}

/// 内容被浏览一次后的内容分析
///
/// `timed_views` 为此前带时长的浏览次数，用于维护平均阅读时长。
pub fn apply_content_view(
    analytics: &ContentAnalytics,
    first_view: bool,
    duration: Option<i64>,
    timed_views: i64,
    now: DateTime<Utc>,
) -> ContentAnalytics {
    let mut next = analytics.clone();
    next.total_views += 1;
    if first_view {
        next.unique_viewers += 1;
    }
    if let Some(seconds) = duration.filter(|d| *d > 0) {
        next.average_time_spent = Some(incremental_mean(
            analytics.average_time_spent.unwrap_or(0.0),
            timed_views,
            seconds as f64,
        ));
    }
    next.updated_at = now;
    next
}

/// 汇总课程内各内容的分析数据
pub fn summarize_course_analytics(course_id: i64, rows: Vec<ContentAnalytics>) -> CourseAnalytics {
    let mut notes = NoteAnalyticsGroup::default();
    let mut assessments = AssessmentAnalyticsGroup::default();
    let mut resources = ResourceAnalyticsGroup::default();

    for row in rows {
        match row.content_type {
            ContentType::Note => {
                notes.total_views += row.total_views as i64;
                notes.total_unique_viewers += row.unique_viewers as i64;
                notes.items.push(row);
            }
            ContentType::Assessment => {
                assessments.total_completions += row.total_completions as i64;
                assessments.items.push(row);
            }
            ContentType::Resource => {
                resources.total_views += row.total_views as i64;
                resources.items.push(row);
            }
        }
    }

    if !assessments.items.is_empty() {
        let count = assessments.items.len() as f64;
        assessments.average_score = assessments
            .items
            .iter()
            .map(|a| a.average_score.unwrap_or(0.0))
            .sum::<f64>()
            / count;
        assessments.average_pass_rate = assessments
            .items
            .iter()
            .map(|a| a.pass_rate.unwrap_or(0.0))
            .sum::<f64>()
            / count;
    }

    CourseAnalytics {
        course_id,
        notes,
        assessments,
        resources,
    }
}

/// 学生在某课程下的成绩汇总
pub fn summarize_course_grades(user_id: i64, course_id: i64, grades: &[Grade]) -> CourseGradeSummary {
    let mut summary = CourseGradeSummary {
        user_id,
        course_id,
        total_grades: grades.len() as i64,
        total_points: 0.0,
        earned_points: 0.0,
        average_percentage: 0.0,
        highest_grade: 0.0,
        lowest_grade: 0.0,
    };
    if grades.is_empty() {
        return summary;
    }

    summary.total_points = grades.iter().map(|g| g.max_score).sum();
    summary.earned_points = grades.iter().map(|g| g.score).sum();
    summary.average_percentage =
        grades.iter().map(|g| g.percentage).sum::<f64>() / grades.len() as f64;
    summary.highest_grade = grades
        .iter()
        .map(|g| g.percentage)
        .fold(f64::MIN, f64::max);
    summary.lowest_grade = grades
        .iter()
        .map(|g| g.percentage)
        .fold(f64::MAX, f64::min);
    summary
}

/// 测评维度统计
pub fn summarize_assessment_attempts(
    assessment_id: i64,
    passing_score: Option<f64>,
    attempts: &[Attempt],
) -> AssessmentStats {
    let graded: Vec<&Attempt> = attempts
        .iter()
        .filter(|a| a.status == AttemptStatus::Graded)
        .collect();
    let percentages: Vec<f64> = graded.iter().map(|a| a.percentage.unwrap_or(0.0)).collect();
    let passed = graded.iter().filter(|a| a.is_passed == Some(true)).count();

    let (average, highest, lowest, pass_rate) = if percentages.is_empty() {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        let n = percentages.len() as f64;
        (
            percentages.iter().sum::<f64>() / n,
            percentages.iter().copied().fold(f64::MIN, f64::max),
            percentages.iter().copied().fold(f64::MAX, f64::min),
            passed as f64 / n * 100.0,
        )
    };

    AssessmentStats {
        assessment_id,
        total_attempts: attempts.len() as i64,
        completed_attempts: graded.len() as i64,
        pending_grading: attempts
            .iter()
            .filter(|a| a.status.is_pending_grading())
            .count() as i64,
        average_score: average,
        highest_score: highest,
        lowest_score: lowest,
        pass_rate,
        passing_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_streak_rules() {
        let mut stats = StudentStats::empty(1, at(1, 8));

        // 首次活动当天计为 1
        stats = apply_note_view(&stats, None, at(1, 9));
        assert_eq!(stats.current_streak, 1);

        // 同一天不变
        stats = apply_note_view(&stats, None, at(1, 23));
        assert_eq!(stats.current_streak, 1);

        // 次日 +1
        stats = apply_note_view(&stats, None, at(2, 0));
        assert_eq!(stats.current_streak, 2);
        stats = apply_graded_attempt(&stats, 80.0, at(3, 12));
        assert_eq!(stats.current_streak, 3);

        // 中断后重置
        stats = apply_note_view(&stats, None, at(3, 12) + Duration::days(2));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn test_graded_attempts_average() {
        let mut stats = StudentStats::empty(1, at(1, 8));
        for p in [100.0, 50.0, 75.0] {
            stats = apply_graded_attempt(&stats, p, at(1, 9));
        }
        assert_eq!(stats.total_assessments_completed, 3);
        assert!((stats.average_score - 75.0).abs() < 1e-9);
        assert_eq!(stats.highest_score, 100.0);
    }

    #[test]
    fn test_note_view_time_spent() {
        let stats = StudentStats::empty(1, at(1, 8));
        let next = apply_note_view(&stats, Some(120), at(1, 9));
        assert_eq!(next.total_notes_viewed, 1);
        assert_eq!(next.total_time_spent, 120);
    }

    #[test]
    fn test_assessment_completion_pass_rate() {
        let empty = ContentAnalytics::empty(ContentType::Assessment, 9, 1, at(1, 8));
        let once = apply_assessment_completion(&empty, 100.0, true, at(1, 9));
        let twice = apply_assessment_completion(&once, 40.0, false, at(1, 10));
        assert_eq!(twice.total_completions, 2);
        assert_eq!(twice.total_passed, 1);
        assert_eq!(twice.pass_rate, Some(50.0));
        assert_eq!(twice.average_score, Some(70.0));
    }

    #[test]
    fn test_content_view_unique_viewers() {
        let empty = ContentAnalytics::empty(ContentType::Note, 3, 1, at(1, 8));
        let first = apply_content_view(&empty, true, Some(60), 0, at(1, 9));
        let again = apply_content_view(&first, false, Some(120), 1, at(1, 10));
        assert_eq!(again.total_views, 2);
        assert_eq!(again.unique_viewers, 1);
        assert_eq!(again.average_time_spent, Some(90.0));
    }

    #[test]
    fn test_course_analytics_grouping() {
        let mut note = ContentAnalytics::empty(ContentType::Note, 1, 7, at(1, 8));
        note.total_views = 5;
        note.unique_viewers = 3;
        let mut quiz = ContentAnalytics::empty(ContentType::Assessment, 2, 7, at(1, 8));
        quiz.total_completions = 4;
        quiz.average_score = Some(80.0);
        quiz.pass_rate = Some(75.0);

        let summary = summarize_course_analytics(7, vec![note, quiz]);
        assert_eq!(summary.notes.total_views, 5);
        assert_eq!(summary.notes.total_unique_viewers, 3);
        assert_eq!(summary.assessments.total_completions, 4);
        assert_eq!(summary.assessments.average_score, 80.0);
        assert!(summary.resources.items.is_empty());
    }
}
