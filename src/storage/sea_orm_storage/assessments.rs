use super::{SeaOrmStorage, db_err};
use crate::entity::assessments::{ActiveModel, Column, Entity as Assessments};
use crate::entity::question_responses::{Column as ResponseColumn, Entity as QuestionResponses};
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
    KindColumns,
};
use crate::errors::{LmsError, Result};
use crate::models::assessments::{
    entities::{Assessment, Question},
    requests::{
        CreateAssessmentRequest, CreateQuestionRequest, UpdateAssessmentRequest,
        UpdateQuestionRequest,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建测评，初始为未发布
    pub async fn create_assessment_impl(&self, req: CreateAssessmentRequest) -> Result<Assessment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            description: Set(req.description),
            assessment_type: Set(req.assessment_type.as_str().to_string()),
            total_points: Set(req.total_points),
            passing_score: Set(req.passing_score),
            time_limit: Set(req.time_limit),
            max_attempts: Set(req.max_attempts),
            shuffle_questions: Set(req.shuffle_questions),
            show_correct_answers: Set(req.show_correct_answers),
            is_published: Set(false),
            is_visible_to_students: Set(false),
            available_from: Set(req.available_from.map(|d| d.timestamp())),
            available_until: Set(req.available_until.map(|d| d.timestamp())),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("创建测评失败"))?;

        Ok(result.into_assessment())
    }

    /// 通过 ID 获取测评
    pub async fn get_assessment_by_id_impl(&self, assessment_id: i64) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(assessment_id)
            .one(&self.db)
            .await
            .map_err(db_err("查询测评失败"))?;

        Ok(result.map(|m| m.into_assessment()))
    }

    /// 更新测评
    pub async fn update_assessment_impl(
        &self,
        assessment_id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        if self.get_assessment_by_id_impl(assessment_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(assessment_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(assessment_type) = update.assessment_type {
            model.assessment_type = Set(assessment_type.as_str().to_string());
        }
        if let Some(total_points) = update.total_points {
            model.total_points = Set(total_points);
        }
        if let Some(passing_score) = update.passing_score {
            model.passing_score = Set(Some(passing_score));
        }
        if let Some(time_limit) = update.time_limit {
            model.time_limit = Set(Some(time_limit));
        }
        if let Some(max_attempts) = update.max_attempts {
            model.max_attempts = Set(Some(max_attempts));
        }
        if let Some(shuffle) = update.shuffle_questions {
            model.shuffle_questions = Set(shuffle);
        }
        if let Some(show) = update.show_correct_answers {
            model.show_correct_answers = Set(show);
        }
        if let Some(from) = update.available_from {
            model.available_from = Set(Some(from.timestamp()));
        }
        if let Some(until) = update.available_until {
            model.available_until = Set(Some(until.timestamp()));
        }

        let result = model.update(&self.db).await.map_err(db_err("更新测评失败"))?;

        Ok(Some(result.into_assessment()))
    }

    /// 设置测评发布与可见状态
    pub async fn set_assessment_visibility_impl(
        &self,
        assessment_id: i64,
        is_published: bool,
        is_visible_to_students: bool,
    ) -> Result<Option<Assessment>> {
        if self.get_assessment_by_id_impl(assessment_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(assessment_id),
            is_published: Set(is_published),
            is_visible_to_students: Set(is_visible_to_students),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(db_err("更新测评可见性失败"))?;

        Ok(Some(result.into_assessment()))
    }

    /// 列出课程下的测评
    pub async fn list_assessments_impl(
        &self,
        course_id: i64,
        include_unpublished: bool,
    ) -> Result<Vec<Assessment>> {
        let mut select = Assessments::find().filter(Column::CourseId.eq(course_id));

        if !include_unpublished {
            select = select
                .filter(Column::IsPublished.eq(true))
                .filter(Column::IsVisibleToStudents.eq(true));
        }

        let assessments = select
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("查询测评列表失败"))?;

        Ok(assessments
            .into_iter()
            .map(|m| m.into_assessment())
            .collect())
    }

    /// 添加题目
    pub async fn create_question_impl(
        &self,
        assessment_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<Question> {
        let now = chrono::Utc::now().timestamp();
        let columns = KindColumns::from_kind(&req.kind)?;

        let model = QuestionActiveModel {
            assessment_id: Set(assessment_id),
            question_type: Set(columns.question_type),
            prompt: Set(req.prompt),
            explanation: Set(req.explanation),
            points: Set(req.points),
            display_order: Set(req.display_order),
            options: Set(columns.options),
            rubric: Set(columns.rubric),
            allowed_file_types: Set(columns.allowed_file_types),
            max_file_size: Set(columns.max_file_size),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("创建题目失败"))?;

        result.into_question()
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, question_id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(db_err("查询题目失败"))?;

        result.map(|m| m.into_question()).transpose()
    }

    /// 更新题目
    pub async fn update_question_impl(
        &self,
        question_id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>> {
        if self.get_question_by_id_impl(question_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = QuestionActiveModel {
            id: Set(question_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(prompt) = update.prompt {
            model.prompt = Set(prompt);
        }
        if let Some(explanation) = update.explanation {
            model.explanation = Set(Some(explanation));
        }
        if let Some(points) = update.points {
            model.points = Set(points);
        }
        if let Some(display_order) = update.display_order {
            model.display_order = Set(display_order);
        }
        // 类型整体替换，旧类型的列清空
        if let Some(kind) = update.kind {
            let columns = KindColumns::from_kind(&kind)?;
            model.question_type = Set(columns.question_type);
            model.options = Set(columns.options);
            model.rubric = Set(columns.rubric);
            model.allowed_file_types = Set(columns.allowed_file_types);
            model.max_file_size = Set(columns.max_file_size);
        }

        let result = model.update(&self.db).await.map_err(db_err("更新题目失败"))?;

        result.into_question().map(Some)
    }

    /// 删除题目，已有作答的题目不可删除
    pub async fn delete_question_impl(&self, question_id: i64) -> Result<bool> {
        let answered = QuestionResponses::find()
            .filter(ResponseColumn::QuestionId.eq(question_id))
            .count(&self.db)
            .await
            .map_err(db_err("查询题目作答失败"))?;

        if answered > 0 {
            return Err(LmsError::invalid_state(format!(
                "题目 {question_id} 已有 {answered} 条作答，不可删除"
            )));
        }

        let result = Questions::delete_by_id(question_id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除题目失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 按顺序列出测评题目
    pub async fn list_questions_impl(&self, assessment_id: i64) -> Result<Vec<Question>> {
        let questions = Questions::find()
            .filter(QuestionColumn::AssessmentId.eq(assessment_id))
            .order_by_asc(QuestionColumn::DisplayOrder)
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err("查询题目列表失败"))?;

        questions.into_iter().map(|m| m.into_question()).collect()
    }
}
