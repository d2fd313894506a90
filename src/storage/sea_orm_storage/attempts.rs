use super::{SeaOrmStorage, db_err};
use crate::entity::assessment_attempts::{ActiveModel, Column, Entity as AssessmentAttempts};
use crate::entity::question_responses::{
    ActiveModel as ResponseActiveModel, Column as ResponseColumn, Entity as QuestionResponses,
};
use crate::errors::{LmsError, Result};
use crate::models::attempts::entities::{AnswerPayload, Attempt, AttemptStatus, QuestionResponse};
use crate::storage::ResponseUpsert;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 作答内容拆分为三列
fn answer_columns(answer: &AnswerPayload) -> (Option<String>, Option<String>, Option<String>) {
    match answer {
        AnswerPayload::SelectedOption { option_id } => (Some(option_id.clone()), None, None),
        AnswerPayload::Text { text } => (None, Some(text.clone()), None),
        AnswerPayload::File { file_ref } => (None, None, Some(file_ref.clone())),
    }
}

impl SeaOrmStorage {
    /// 统计学生在某测评下的作答次数
    pub async fn count_attempts_impl(&self, assessment_id: i64, user_id: i64) -> Result<i64> {
        let count = AssessmentAttempts::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(db_err("统计作答次数失败"))?;

        Ok(count as i64)
    }

    /// 创建作答
    ///
    /// (assessment_id, user_id, attempt_number) 唯一，并发开始时后到者返回 Conflict。
    pub async fn create_attempt_impl(
        &self,
        assessment_id: i64,
        user_id: i64,
        attempt_number: i32,
        started_at: DateTime<Utc>,
    ) -> Result<Attempt> {
        let model = ActiveModel {
            assessment_id: Set(assessment_id),
            user_id: Set(user_id),
            attempt_number: Set(attempt_number),
            status: Set(AttemptStatus::InProgress.as_str().to_string()),
            started_at: Set(started_at.timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("创建作答失败"))?;

        Ok(result.into_attempt())
    }

    /// 通过 ID 获取作答
    pub async fn get_attempt_by_id_impl(&self, attempt_id: i64) -> Result<Option<Attempt>> {
        let result = AssessmentAttempts::find_by_id(attempt_id)
            .one(&self.db)
            .await
            .map_err(db_err("查询作答失败"))?;

        Ok(result.map(|m| m.into_attempt()))
    }

    /// 列出学生在某测评下的作答
    pub async fn list_attempts_impl(&self, assessment_id: i64, user_id: i64) -> Result<Vec<Attempt>> {
        let attempts = AssessmentAttempts::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::AttemptNumber)
            .all(&self.db)
            .await
            .map_err(db_err("查询作答列表失败"))?;

        Ok(attempts.into_iter().map(|m| m.into_attempt()).collect())
    }

    /// 列出测评的全部作答
    pub async fn list_attempts_by_assessment_impl(&self, assessment_id: i64) -> Result<Vec<Attempt>> {
        let attempts = AssessmentAttempts::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("查询作答列表失败"))?;

        Ok(attempts.into_iter().map(|m| m.into_attempt()).collect())
    }

    /// 写入题目作答，已有则覆盖
    ///
    /// 作答状态在事务内复查，已提交的作答不再接受修改。
    pub async fn upsert_response_impl(&self, req: ResponseUpsert) -> Result<QuestionResponse> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let attempt = AssessmentAttempts::find_by_id(req.attempt_id)
            .one(&txn)
            .await
            .map_err(db_err("查询作答失败"))?
            .ok_or_else(|| LmsError::not_found(format!("作答 {} 不存在", req.attempt_id)))?;

        if attempt.status != AttemptStatus::InProgress.as_str() {
            return Err(LmsError::invalid_state(format!(
                "作答 {} 当前状态为 {}，不能再修改答案",
                req.attempt_id, attempt.status
            )));
        }

        let existing = QuestionResponses::find()
            .filter(ResponseColumn::AttemptId.eq(req.attempt_id))
            .filter(ResponseColumn::QuestionId.eq(req.question_id))
            .one(&txn)
            .await
            .map_err(db_err("查询题目作答失败"))?;

        let (selected_option_id, text_response, file_ref) = answer_columns(&req.answer);

        let mut model = ResponseActiveModel {
            attempt_id: Set(req.attempt_id),
            question_id: Set(req.question_id),
            selected_option_id: Set(selected_option_id),
            text_response: Set(text_response),
            file_ref: Set(file_ref),
            is_auto_graded: Set(req.is_auto_graded),
            is_correct: Set(req.is_correct),
            points_awarded: Set(req.points_awarded),
            feedback: Set(None),
            graded_by: Set(None),
            graded_at: Set(None),
            answered_at: Set(req.answered_at.timestamp()),
            ..Default::default()
        };

        let saved = match existing {
            Some(row) => {
                model.id = Set(row.id);
                model.update(&txn).await.map_err(db_err("更新题目作答失败"))?
            }
            // (attempt_id, question_id) 唯一，并发首次作答时返回 Conflict
            None => model.insert(&txn).await.map_err(db_err("创建题目作答失败"))?,
        };

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(saved.into_response())
    }

    /// 通过 ID 获取题目作答
    pub async fn get_response_by_id_impl(&self, response_id: i64) -> Result<Option<QuestionResponse>> {
        let result = QuestionResponses::find_by_id(response_id)
            .one(&self.db)
            .await
            .map_err(db_err("查询题目作答失败"))?;

        Ok(result.map(|m| m.into_response()))
    }

    /// 列出作答下的全部题目作答
    pub async fn list_responses_impl(&self, attempt_id: i64) -> Result<Vec<QuestionResponse>> {
        let responses = QuestionResponses::find()
            .filter(ResponseColumn::AttemptId.eq(attempt_id))
            .order_by_asc(ResponseColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err("查询题目作答列表失败"))?;

        Ok(responses.into_iter().map(|m| m.into_response()).collect())
    }
}
