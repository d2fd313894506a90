//! 预导入模块，方便使用

pub use super::assessment_attempts::{
    ActiveModel as AttemptActiveModel, Entity as AssessmentAttempts, Model as AttemptModel,
};
pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::content_analytics::{
    ActiveModel as ContentAnalyticsActiveModel, Entity as ContentAnalytics,
    Model as ContentAnalyticsModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::note_views::{
    ActiveModel as NoteViewActiveModel, Entity as NoteViews, Model as NoteViewModel,
};
pub use super::notes::{ActiveModel as NoteActiveModel, Entity as Notes, Model as NoteModel};
pub use super::question_responses::{
    ActiveModel as ResponseActiveModel, Entity as QuestionResponses, Model as ResponseModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::resource_access::{
    ActiveModel as ResourceAccessActiveModel, Entity as ResourceAccess,
    Model as ResourceAccessModel,
};
pub use super::resources::{
    ActiveModel as ResourceActiveModel, Entity as Resources, Model as ResourceModel,
};
pub use super::student_stats::{
    ActiveModel as StudentStatsActiveModel, Entity as StudentStats, Model as StudentStatsModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
