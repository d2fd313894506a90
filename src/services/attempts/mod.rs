pub mod get;
pub mod start;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attempts::requests::{
    AttemptListQuery, StartAttemptRequest, SubmitResponseRequest,
};
use crate::storage::Storage;

pub struct AttemptService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttemptService {
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

    // 开始作答
    pub async fn start_attempt(
        &self,
        body: StartAttemptRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        start::start_attempt(self, body, request).await
    }

    // 提交单题答案
    pub async fn submit_response(
        &self,
        attempt_id: i64,
        body: SubmitResponseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_response(self, attempt_id, body, request).await
    }

    // 提交整份作答
    pub async fn submit_attempt(
        &self,
        attempt_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_attempt(self, attempt_id, request).await
    }

    pub async fn get_attempt(
        &self,
        attempt_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_attempt(self, attempt_id, request).await
    }

    pub async fn list_attempts(
        &self,
        query: AttemptListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_attempts(self, query, request).await
    }
}
