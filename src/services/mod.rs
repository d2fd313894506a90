pub mod assessments;
pub mod attempts;
pub mod courses;
pub mod grades;
pub mod grading;
pub mod notes;
pub mod resources;
pub mod stats;
pub mod users;

pub use assessments::AssessmentService;
pub use attempts::AttemptService;
pub use courses::CourseService;
pub use grades::GradeService;
pub use grading::GradingService;
pub use notes::NoteService;
pub use resources::ResourceService;
pub use stats::StatsService;
pub use users::UserService;
