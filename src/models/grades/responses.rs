use super::entities::Grade;
use crate::models::assessments::entities::AssessmentType;
use crate::models::users::entities::UserSummary;
use serde::Serialize;
use ts_rs::TS;

// 学生成绩条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentGradeItem {
    pub grade: Grade,
    pub assessment_title: String,
    pub assessment_type: AssessmentType,
    pub course_code: String,
    pub course_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentGradeListResponse {
    pub items: Vec<StudentGradeItem>,
}

// 测评成绩条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct AssessmentGradeItem {
    pub grade: Grade,
    pub student: UserSummary,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct AssessmentGradeListResponse {
    pub items: Vec<AssessmentGradeItem>,
}

/// 学生在某课程下的成绩汇总
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CourseGradeSummary {
    pub user_id: i64,
    pub course_id: i64,
    pub total_grades: i64,
    pub total_points: f64,
    pub earned_points: f64,
    pub average_percentage: f64,
    pub highest_grade: f64,
    pub lowest_grade: f64,
}
