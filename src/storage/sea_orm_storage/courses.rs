use super::{SeaOrmStorage, aggregates::write_stats, db_err};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as Enrollments,
};
use crate::errors::{LmsError, Result};
use crate::models::courses::{
    entities::{Course, Enrollment, EnrollmentStatus},
    requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    responses::EnrolledCourse,
};
use crate::storage::{EnrollmentCommit, ProgressCommit};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            description: Set(req.description),
            cover_image: Set(req.cover_image),
            is_published: Set(false),
            is_archived: Set(false),
            created_by: Set(req.created_by),
            start_date: Set(req.start_date.map(|d| d.timestamp())),
            end_date: Set(req.end_date.map(|d| d.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("创建课程失败"))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(db_err("查询课程失败"))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过课程代码获取课程
    pub async fn get_course_by_code_impl(&self, code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_err("查询课程失败"))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(cover_image) = update.cover_image {
            model.cover_image = Set(Some(cover_image));
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(Some(start_date.timestamp()));
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(Some(end_date.timestamp()));
        }

        let result = model.update(&self.db).await.map_err(db_err("更新课程失败"))?;

        Ok(Some(result.into_course()))
    }

    /// 发布或撤回课程
    pub async fn set_course_published_impl(
        &self,
        course_id: i64,
        published: bool,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(course_id),
            is_published: Set(published),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(db_err("更新课程发布状态失败"))?;

        Ok(Some(result.into_course()))
    }

    /// 归档课程
    pub async fn archive_course_impl(&self, course_id: i64) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(course_id),
            is_archived: Set(true),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.update(&self.db).await.map_err(db_err("归档课程失败"))?;

        Ok(Some(result.into_course()))
    }

    /// 列出课程
    pub async fn list_courses_impl(&self, query: CourseListQuery) -> Result<Vec<Course>> {
        let mut select = Courses::find();

        if query.published_only {
            select = select
                .filter(Column::IsPublished.eq(true))
                .filter(Column::IsArchived.eq(false));
        }
        if let Some(created_by) = query.created_by {
            select = select.filter(Column::CreatedBy.eq(created_by));
        }

        let courses = select
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(db_err("查询课程列表失败"))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 获取选课记录
    pub async fn get_enrollment_impl(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(db_err("查询选课记录失败"))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 选课并更新学生统计
    pub async fn enroll_student_impl(&self, commit: EnrollmentCommit) -> Result<Enrollment> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let model = EnrollmentActiveModel {
            user_id: Set(commit.user_id),
            course_id: Set(commit.course_id),
            progress: Set(0.0),
            status: Set(EnrollmentStatus::Active.as_str().to_string()),
            enrolled_at: Set(commit.enrolled_at.timestamp()),
            completed_at: Set(None),
            ..Default::default()
        };

        // (user_id, course_id) 唯一，重复选课返回 Conflict
        let enrollment = model.insert(&txn).await.map_err(db_err("创建选课记录失败"))?;

        write_stats(&txn, &commit.stats).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(enrollment.into_enrollment())
    }

    /// 更新学习进度，进度达到 100 时同时标记完成
    pub async fn update_enrollment_progress_impl(
        &self,
        commit: ProgressCommit,
    ) -> Result<Enrollment> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let mut model = EnrollmentActiveModel {
            progress: Set(commit.progress),
            ..Default::default()
        };
        let mut update = Enrollments::update_many().filter(EnrollmentColumn::Id.eq(commit.enrollment_id));

        if let Some(completion) = &commit.completion {
            model.status = Set(EnrollmentStatus::Completed.as_str().to_string());
            model.completed_at = Set(Some(completion.completed_at.timestamp()));
            // 只允许完成一次
            update = update.filter(EnrollmentColumn::Status.ne(EnrollmentStatus::Completed.as_str()));
        }

        let result = update
            .set(model)
            .exec(&txn)
            .await
            .map_err(db_err("更新学习进度失败"))?;

        if result.rows_affected == 0 {
            return Err(LmsError::conflict(format!(
                "选课记录 {} 已被并发修改",
                commit.enrollment_id
            )));
        }

        if let Some(completion) = &commit.completion {
            write_stats(&txn, &completion.stats).await?;
        }

        let enrollment = Enrollments::find_by_id(commit.enrollment_id)
            .one(&txn)
            .await
            .map_err(db_err("查询选课记录失败"))?
            .ok_or_else(|| LmsError::not_found("选课记录不存在"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(enrollment.into_enrollment())
    }

    /// 列出学生在读课程
    pub async fn list_enrolled_courses_impl(&self, user_id: i64) -> Result<Vec<EnrolledCourse>> {
        let rows = Enrollments::find()
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.as_str()))
            .order_by_desc(EnrollmentColumn::EnrolledAt)
            .find_also_related(Courses)
            .all(&self.db)
            .await
            .map_err(db_err("查询已选课程失败"))?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                course.map(|c| EnrolledCourse {
                    enrollment: enrollment.into_enrollment(),
                    course: c.into_course(),
                })
            })
            .collect())
    }
}
