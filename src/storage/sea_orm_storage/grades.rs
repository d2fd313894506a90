//! 成绩存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_err};
use crate::entity::assessments::{Column as AssessmentColumn, Entity as Assessments};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::grades::{Column, Entity as Grades};
use crate::entity::users::Entity as Users;
use crate::errors::Result;
use crate::models::{
    assessments::entities::AssessmentType,
    grades::{
        entities::Grade,
        responses::{AssessmentGradeItem, StudentGradeItem},
    },
    users::entities::UserSummary,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 通过作答 ID 获取成绩
    pub async fn get_grade_by_attempt_id_impl(&self, attempt_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::AttemptId.eq(attempt_id))
            .one(&self.db)
            .await
            .map_err(db_err("查询成绩失败"))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 列出学生全部成绩，附带测评与课程信息
    pub async fn list_grades_by_student_impl(&self, user_id: i64) -> Result<Vec<StudentGradeItem>> {
        let grades = Grades::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::RecordedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("查询学生成绩失败"))?;

        if grades.is_empty() {
            return Ok(Vec::new());
        }

        let assessment_ids: Vec<i64> = grades.iter().map(|g| g.assessment_id).collect();
        let course_ids: Vec<i64> = grades.iter().map(|g| g.course_id).collect();

        let assessments: HashMap<i64, _> = Assessments::find()
            .filter(AssessmentColumn::Id.is_in(assessment_ids))
            .all(&self.db)
            .await
            .map_err(db_err("查询测评失败"))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let courses: HashMap<i64, _> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(db_err("查询课程失败"))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        Ok(grades
            .into_iter()
            .filter_map(|grade| {
                let assessment = assessments.get(&grade.assessment_id)?;
                let course = courses.get(&grade.course_id)?;
                Some(StudentGradeItem {
                    assessment_title: assessment.title.clone(),
                    assessment_type: assessment
                        .assessment_type
                        .parse()
                        .unwrap_or(AssessmentType::Quiz),
                    course_code: course.code.clone(),
                    course_name: course.name.clone(),
                    grade: grade.into_grade(),
                })
            })
            .collect())
    }

    /// 列出学生在某课程下的成绩
    pub async fn list_grades_by_student_and_course_impl(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Vec<Grade>> {
        let grades = Grades::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::RecordedAt)
            .all(&self.db)
            .await
            .map_err(db_err("查询课程成绩失败"))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 列出测评的全部成绩，附带学生信息
    pub async fn list_grades_by_assessment_impl(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<AssessmentGradeItem>> {
        let rows = Grades::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_desc(Column::Percentage)
            .order_by_asc(Column::Id)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(db_err("查询测评成绩失败"))?;

        Ok(rows
            .into_iter()
            .filter_map(|(grade, user)| {
                let user = user?.into_user();
                Some(AssessmentGradeItem {
                    grade: grade.into_grade(),
                    student: UserSummary::from(&user),
                })
            })
            .collect())
    }
}
