pub mod create;
pub mod enrollment;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    CourseListQuery, CreateCourseRequest, EnrollRequest, UpdateCourseRequest,
    UpdateProgressRequest,
};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_course(
        &self,
        course: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, course, request).await
    }

    pub async fn get_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, course_id, request).await
    }

    pub async fn list_courses(
        &self,
        query: CourseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    pub async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, course_id, update, request).await
    }

    // 发布或下线课程
    pub async fn set_published(
        &self,
        course_id: i64,
        published: bool,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::set_published(self, course_id, published, request).await
    }

    pub async fn archive_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::archive_course(self, course_id, request).await
    }

    // 选课
    pub async fn enroll(
        &self,
        course_id: i64,
        body: EnrollRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enrollment::enroll(self, course_id, body, request).await
    }

    // 更新学习进度
    pub async fn update_progress(
        &self,
        course_id: i64,
        body: UpdateProgressRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enrollment::update_progress(self, course_id, body, request).await
    }

    // 学生已选课程
    pub async fn list_enrolled_courses(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_enrolled_courses(self, user_id, request).await
    }
}
