pub mod access;
pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::resources::requests::{
    CreateResourceRequest, RecordResourceAccessRequest, ResourceListQuery,
    ResourceVisibilityRequest, UpdateResourceRequest,
};
use crate::storage::Storage;

pub struct ResourceService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResourceService {
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

    pub async fn create_resource(
        &self,
        resource: CreateResourceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_resource(self, resource, request).await
    }

    pub async fn get_resource(
        &self,
        resource_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_resource(self, resource_id, request).await
    }

    pub async fn list_resources(
        &self,
        course_id: i64,
        query: ResourceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_resources(self, course_id, query, request).await
    }

    pub async fn list_categories(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_categories(self, course_id, request).await
    }

    pub async fn update_resource(
        &self,
        resource_id: i64,
        update: UpdateResourceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_resource(self, resource_id, update, request).await
    }

    pub async fn set_visibility(
        &self,
        resource_id: i64,
        body: ResourceVisibilityRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::set_visibility(self, resource_id, body, request).await
    }

    pub async fn delete_resource(
        &self,
        resource_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_resource(self, resource_id, request).await
    }

    // 记录浏览或下载
    pub async fn record_access(
        &self,
        resource_id: i64,
        body: RecordResourceAccessRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        access::record_access(self, resource_id, body, request).await
    }
}
