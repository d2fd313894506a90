//! 学习行为：浏览笔记、访问资源、选课、学习进度
//!
//! 每个行为在写入主记录的同一事务中更新学生统计和内容分析。

use chrono::Utc;
use tracing::info;

use super::{analytics, load_analytics, load_stats, retry_on_conflict};
use crate::errors::{LmsError, Result};
use crate::models::courses::entities::{Enrollment, EnrollmentStatus};
use crate::models::notes::entities::{Note, NoteView};
use crate::models::resources::entities::{AccessAction, Resource, ResourceAccess};
use crate::models::stats::entities::ContentType;
use crate::models::users::entities::UserRole;
use crate::storage::{
    AnalyticsWrite, CompletionWrite, EnrollmentCommit, NoteViewCommit, ProgressCommit,
    ResourceAccessCommit, StatsWrite, Storage,
};

/// 进度满值
const COMPLETE_PROGRESS: f64 = 100.0;

/// 记录一次笔记浏览
pub async fn record_note_view(
    storage: &dyn Storage,
    note_id: i64,
    user_id: i64,
    duration: Option<i64>,
) -> Result<NoteView> {
    if duration.is_some_and(|d| d < 0) {
        return Err(LmsError::validation("浏览时长不能为负数"));
    }

    let note = storage
        .get_note_by_id(note_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("笔记 {note_id} 不存在")))?;

    if storage.get_user_by_id(user_id).await?.is_none() {
        return Err(LmsError::not_found(format!("用户 {user_id} 不存在")));
    }

    retry_on_conflict("记录笔记浏览", || {
        try_record_view(storage, &note, user_id, duration)
    })
    .await
}

async fn try_record_view(
    storage: &dyn Storage,
    note: &Note,
    user_id: i64,
    duration: Option<i64>,
) -> Result<NoteView> {
    let now = Utc::now();

    // 先判断是否首次浏览，再写入浏览记录
    let first_view = !storage.has_viewed_note(note.id, user_id).await?;
    let timed_views = storage.count_timed_note_views(note.id).await?;

    let (expected_version, stats) = load_stats(storage, user_id, now).await?;
    let (previous, base) =
        load_analytics(storage, ContentType::Note, note.id, note.course_id, now).await?;

    let view = storage
        .record_note_view(NoteViewCommit {
            note_id: note.id,
            user_id,
            duration,
            viewed_at: now,
            stats: StatsWrite {
                expected_version,
                stats: analytics::apply_note_view(&stats, duration, now),
            },
            analytics: AnalyticsWrite {
                previous,
                analytics: analytics::apply_content_view(&base, first_view, duration, timed_views, now),
            },
        })
        .await?;

    info!(
        "用户 {user_id} 浏览笔记 {}{}",
        note.id,
        if first_view { " (首次)" } else { "" }
    );
    Ok(view)
}

/// 记录一次资源访问
///
/// 浏览和下载都计入资源分析的浏览数，不影响学生统计。
pub async fn record_resource_access(
    storage: &dyn Storage,
    resource_id: i64,
    user_id: i64,
    action: AccessAction,
) -> Result<ResourceAccess> {
    let resource = storage
        .get_resource_by_id(resource_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("资源 {resource_id} 不存在")))?;

    if storage.get_user_by_id(user_id).await?.is_none() {
        return Err(LmsError::not_found(format!("用户 {user_id} 不存在")));
    }

    retry_on_conflict("记录资源访问", || {
        try_record_access(storage, &resource, user_id, action)
    })
    .await
}

async fn try_record_access(
    storage: &dyn Storage,
    resource: &Resource,
    user_id: i64,
    action: AccessAction,
) -> Result<ResourceAccess> {
    let now = Utc::now();

    let first_access = !storage.has_accessed_resource(resource.id, user_id).await?;
    let (previous, base) = load_analytics(
        storage,
        ContentType::Resource,
        resource.id,
        resource.course_id,
        now,
    )
    .await?;

    let access = storage
        .record_resource_access(ResourceAccessCommit {
            resource_id: resource.id,
            user_id,
            action,
            accessed_at: now,
            analytics: AnalyticsWrite {
                previous,
                analytics: analytics::apply_content_view(&base, first_access, None, 0, now),
            },
        })
        .await?;

    info!(
        "用户 {user_id} {} 资源 {}{}",
        action.as_str(),
        resource.id,
        if first_access { " (首次)" } else { "" }
    );
    Ok(access)
}

/// 学生选课
pub async fn enroll_student(storage: &dyn Storage, course_id: i64, user_id: i64) -> Result<Enrollment> {
    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("课程 {course_id} 不存在")))?;

    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("用户 {user_id} 不存在")))?;

    if !user.is_active {
        return Err(LmsError::authorization(format!("用户 {user_id} 已停用")));
    }
    if user.role != UserRole::Student {
        return Err(LmsError::validation(format!(
            "只有学生可以选课，用户 {user_id} 的角色为 {}",
            user.role
        )));
    }
    if course.is_archived {
        return Err(LmsError::invalid_state(format!("课程 {} 已归档", course.code)));
    }

    let code = course.code.as_str();
    // 已选课返回 None，只有写入冲突才进入重试
    let enrolled = retry_on_conflict("选课", move || async move {
        if storage.get_enrollment(user_id, course_id).await?.is_some() {
            return Ok(None);
        }

        let now = Utc::now();
        let (expected_version, stats) = load_stats(storage, user_id, now).await?;

        storage
            .enroll_student(EnrollmentCommit {
                user_id,
                course_id,
                enrolled_at: now,
                stats: StatsWrite {
                    expected_version,
                    stats: analytics::apply_enrollment(&stats, now),
                },
            })
            .await
            .map(Some)
    })
    .await?;

    match enrolled {
        Some(enrollment) => {
            info!("学生 {user_id} 选修课程 {code}");
            Ok(enrollment)
        }
        None => Err(LmsError::conflict(format!(
            "用户 {user_id} 已选修课程 {code}"
        ))),
    }
}

/// 更新学习进度，首次达到 100 时标记课程完成
pub async fn update_progress(
    storage: &dyn Storage,
    course_id: i64,
    user_id: i64,
    progress: f64,
) -> Result<Enrollment> {
    if !progress.is_finite() || !(0.0..=COMPLETE_PROGRESS).contains(&progress) {
        return Err(LmsError::validation(format!(
            "学习进度 {progress} 超出范围 [0, 100]"
        )));
    }

    retry_on_conflict("更新学习进度", move || async move {
        let enrollment = storage
            .get_enrollment(user_id, course_id)
            .await?
            .ok_or_else(|| {
                LmsError::not_found(format!("用户 {user_id} 未选修课程 {course_id}"))
            })?;

        let now = Utc::now();
        let completion = if progress >= COMPLETE_PROGRESS
            && enrollment.status != EnrollmentStatus::Completed
        {
            let (expected_version, stats) = load_stats(storage, user_id, now).await?;
            Some(CompletionWrite {
                completed_at: now,
                stats: StatsWrite {
                    expected_version,
                    stats: analytics::apply_course_completion(&stats, now),
                },
            })
        } else {
            None
        };
        let completed = completion.is_some();

        let updated = storage
            .update_enrollment_progress(ProgressCommit {
                enrollment_id: enrollment.id,
                progress,
                completion,
            })
            .await?;

        if completed {
            info!("学生 {user_id} 完成课程 {course_id}");
        }
        Ok(updated)
    })
    .await
}
