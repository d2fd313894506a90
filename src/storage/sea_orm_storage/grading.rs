//! 评分流程存储
//!
//! 作答状态的每次迁移都是带条件的 UPDATE，影响行数为 0 表示状态已被他人改变。

use std::collections::HashMap;

use super::{
    SeaOrmStorage,
    aggregates::{write_analytics, write_stats},
    db_err,
};
use crate::entity::assessment_attempts::{ActiveModel, Column, Entity as AssessmentAttempts};
use crate::entity::assessments::{Column as AssessmentColumn, Entity as Assessments};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::grades::ActiveModel as GradeActiveModel;
use crate::entity::question_responses::{
    ActiveModel as ResponseActiveModel, Column as ResponseColumn, Entity as QuestionResponses,
};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{LmsError, Result};
use crate::models::{
    assessments::entities::AssessmentType,
    attempts::{
        entities::{AttemptStatus, QuestionResponse},
        responses::PendingGradingItem,
    },
    grades::entities::Grade,
    users::entities::UserSummary,
};
use crate::storage::{GradingCommit, ResponseGradeWrite};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// in_progress -> submitted
    pub async fn mark_attempt_submitted_impl(
        &self,
        attempt_id: i64,
        submitted_at: DateTime<Utc>,
    ) -> Result<()> {
        let model = ActiveModel {
            status: Set(AttemptStatus::Submitted.as_str().to_string()),
            submitted_at: Set(Some(submitted_at.timestamp())),
            ..Default::default()
        };

        let result = AssessmentAttempts::update_many()
            .set(model)
            .filter(Column::Id.eq(attempt_id))
            .filter(Column::Status.eq(AttemptStatus::InProgress.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err("提交作答失败"))?;

        if result.rows_affected == 0 {
            return Err(LmsError::conflict(format!("作答 {attempt_id} 状态已改变")));
        }

        Ok(())
    }

    /// submitted -> grading，记录认领人
    pub async fn claim_attempt_impl(&self, attempt_id: i64, grader_id: i64) -> Result<bool> {
        let model = ActiveModel {
            status: Set(AttemptStatus::Grading.as_str().to_string()),
            claimed_by: Set(Some(grader_id)),
            ..Default::default()
        };

        let result = AssessmentAttempts::update_many()
            .set(model)
            .filter(Column::Id.eq(attempt_id))
            .filter(Column::Status.eq(AttemptStatus::Submitted.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err("认领作答失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// grading -> submitted，仅认领人可释放
    pub async fn release_attempt_impl(&self, attempt_id: i64, grader_id: i64) -> Result<bool> {
        let model = ActiveModel {
            status: Set(AttemptStatus::Submitted.as_str().to_string()),
            claimed_by: Set(None),
            ..Default::default()
        };

        let result = AssessmentAttempts::update_many()
            .set(model)
            .filter(Column::Id.eq(attempt_id))
            .filter(Column::Status.eq(AttemptStatus::Grading.as_str()))
            .filter(Column::ClaimedBy.eq(grader_id))
            .exec(&self.db)
            .await
            .map_err(db_err("释放作答失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 人工评分单题
    pub async fn grade_response_impl(&self, write: ResponseGradeWrite) -> Result<QuestionResponse> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let attempt = AssessmentAttempts::find_by_id(write.attempt_id)
            .one(&txn)
            .await
            .map_err(db_err("查询作答失败"))?
            .ok_or_else(|| LmsError::not_found(format!("作答 {} 不存在", write.attempt_id)))?;

        let status = attempt
            .status
            .parse::<AttemptStatus>()
            .map_err(LmsError::serialization)?;

        if status == AttemptStatus::Graded {
            return Err(LmsError::already_graded(format!(
                "作答 {} 已完成评分",
                write.attempt_id
            )));
        }
        if !write.allowed_statuses.contains(&status) {
            return Err(LmsError::invalid_state(format!(
                "作答 {} 当前状态为 {status}，不能评分",
                write.attempt_id
            )));
        }
        if status == AttemptStatus::Grading
            && attempt.claimed_by.is_some_and(|id| id != write.graded_by)
        {
            return Err(LmsError::conflict(format!(
                "作答 {} 已被其他评分人认领",
                write.attempt_id
            )));
        }

        let model = ResponseActiveModel {
            points_awarded: Set(Some(write.points_awarded)),
            feedback: Set(write.feedback),
            graded_by: Set(Some(write.graded_by)),
            graded_at: Set(Some(write.graded_at.timestamp())),
            ..Default::default()
        };

        let result = QuestionResponses::update_many()
            .set(model)
            .filter(ResponseColumn::Id.eq(write.response_id))
            .filter(ResponseColumn::AttemptId.eq(write.attempt_id))
            .exec(&txn)
            .await
            .map_err(db_err("更新题目评分失败"))?;

        if result.rows_affected == 0 {
            return Err(LmsError::not_found(format!(
                "作答 {} 下不存在题目作答 {}",
                write.attempt_id, write.response_id
            )));
        }

        let response = QuestionResponses::find_by_id(write.response_id)
            .one(&txn)
            .await
            .map_err(db_err("查询题目作答失败"))?
            .ok_or_else(|| LmsError::not_found("题目作答不存在"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(response.into_response())
    }

    /// 完成评分
    ///
    /// 作答状态、成绩、学生统计和测评分析要么全部写入，要么全部不写。
    pub async fn commit_grading_impl(&self, commit: GradingCommit) -> Result<Grade> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let mut model = ActiveModel {
            status: Set(AttemptStatus::Graded.as_str().to_string()),
            total_score: Set(Some(commit.total_score)),
            percentage: Set(Some(commit.percentage)),
            is_passed: Set(Some(commit.is_passed)),
            claimed_by: Set(None),
            graded_by: Set(commit.graded_by),
            graded_at: Set(Some(commit.graded_at.timestamp())),
            feedback: Set(commit.feedback.clone()),
            ..Default::default()
        };
        if let Some(submitted_at) = commit.submitted_at {
            model.submitted_at = Set(Some(submitted_at.timestamp()));
        }

        let mut update = AssessmentAttempts::update_many()
            .set(model)
            .filter(Column::Id.eq(commit.attempt_id))
            .filter(Column::Status.eq(commit.expected_status.as_str()));
        if let Some(claimer) = commit.expected_claimed_by {
            update = update.filter(Column::ClaimedBy.eq(claimer));
        }

        let result = update
            .exec(&txn)
            .await
            .map_err(db_err("更新作答状态失败"))?;

        if result.rows_affected == 0 {
            return Err(LmsError::conflict(format!(
                "作答 {} 已不处于 {} 状态",
                commit.attempt_id, commit.expected_status
            )));
        }

        let grade = &commit.grade;
        let grade_model = GradeActiveModel {
            user_id: Set(grade.user_id),
            course_id: Set(grade.course_id),
            assessment_id: Set(grade.assessment_id),
            attempt_id: Set(commit.attempt_id),
            score: Set(grade.score),
            max_score: Set(grade.max_score),
            percentage: Set(grade.percentage),
            letter_grade: Set(Some(grade.letter_grade.clone())),
            is_final: Set(true),
            recorded_at: Set(commit.graded_at.timestamp()),
            recorded_by: Set(grade.recorded_by),
            ..Default::default()
        };

        // attempt_id 唯一，同一作答只会有一条成绩
        let saved = grade_model
            .insert(&txn)
            .await
            .map_err(db_err("写入成绩失败"))?;

        write_stats(&txn, &commit.stats).await?;
        write_analytics(&txn, &commit.analytics).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(saved.into_grade())
    }

    /// 列出待评分作答，按提交时间先后排序
    pub async fn list_pending_grading_impl(&self) -> Result<Vec<PendingGradingItem>> {
        let attempts = AssessmentAttempts::find()
            .filter(Column::Status.is_in([
                AttemptStatus::Submitted.as_str(),
                AttemptStatus::Grading.as_str(),
            ]))
            .order_by_asc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("查询待评分作答失败"))?;

        if attempts.is_empty() {
            return Ok(Vec::new());
        }

        // 批量加载关联数据
        let assessment_ids: Vec<i64> = attempts.iter().map(|a| a.assessment_id).collect();
        let user_ids: Vec<i64> = attempts.iter().map(|a| a.user_id).collect();

        let assessments: HashMap<i64, _> = Assessments::find()
            .filter(AssessmentColumn::Id.is_in(assessment_ids))
            .all(&self.db)
            .await
            .map_err(db_err("查询测评失败"))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let course_ids: Vec<i64> = assessments.values().map(|a| a.course_id).collect();
        let courses: HashMap<i64, _> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(db_err("查询课程失败"))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let users: HashMap<i64, _> = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(db_err("查询学生失败"))?
            .into_iter()
            .map(|m| (m.id, m.into_user()))
            .collect();

        let items = attempts
            .into_iter()
            .filter_map(|attempt| {
                let assessment = assessments.get(&attempt.assessment_id)?;
                let course = courses.get(&assessment.course_id)?;
                let student = users.get(&attempt.user_id)?;
                Some(PendingGradingItem {
                    assessment_title: assessment.title.clone(),
                    assessment_type: assessment
                        .assessment_type
                        .parse()
                        .unwrap_or(AssessmentType::Quiz),
                    total_points: assessment.total_points,
                    student: UserSummary::from(student),
                    course_id: course.id,
                    course_code: course.code.clone(),
                    course_name: course.name.clone(),
                    attempt: attempt.into_attempt(),
                })
            })
            .collect();

        Ok(items)
    }
}
