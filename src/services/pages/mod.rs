pub mod analyze;
pub mod index;
pub mod leaderboard;
pub mod submit;

use actix_multipart::Multipart;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::AppConfig;
use crate::errors::StepboardError;
use crate::media::MediaStore;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::storage::Storage;
use crate::templates::Page;

pub struct PageService {
    storage: Option<Arc<dyn Storage>>,
}

impl PageService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_media_store(&self, request: &HttpRequest) -> Arc<MediaStore> {
        request
            .app_data::<web::Data<Arc<MediaStore>>>()
            .expect("MediaStore not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_analyzer(&self, request: &HttpRequest) -> Arc<dyn Analyzer> {
        request
            .app_data::<web::Data<Arc<dyn Analyzer>>>()
            .expect("Analyzer not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_config(&self, request: &HttpRequest) -> Arc<AppConfig> {
        request
            .app_data::<web::Data<AppConfig>>()
            .expect("AppConfig not found in app data")
            .clone()
            .into_inner()
    }

    /// 渲染页面，模板缺失时退化为纯文本错误
    pub(crate) fn render(
        &self,
        request: &HttpRequest,
        status: StatusCode,
        page: Page,
    ) -> ActixResult<HttpResponse> {
        let config = self.get_config(request);
        match page.render(&config.app.system_name) {
            Ok(html) => Ok(HttpResponse::build(status)
                .content_type("text/html; charset=utf-8")
                .body(html)),
            Err(e) => {
                tracing::error!("{}", e);
                Ok(HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Internal Server Error"))
            }
        }
    }

    /// 通用错误页，不向用户暴露内部细节
    pub(crate) fn error_page(
        &self,
        request: &HttpRequest,
        err: &StepboardError,
    ) -> ActixResult<HttpResponse> {
        let status = err.status_code();
        let message = match err {
            StepboardError::PayloadTooLarge(_) => "The upload is larger than the allowed limit.",
            StepboardError::UploadDisabled(_) => "Uploads are currently unavailable.",
            StepboardError::NotFound(_) => "The requested page does not exist.",
            _ => "Something went wrong while processing your request.",
        };
        let reason = status.canonical_reason().unwrap_or("Error");

        let page = Page::new("error.html", reason)
            .set("status", format!("{} {}", status.as_u16(), reason))
            .set("message", message);
        self.render(request, status, page)
    }

    // 上传页
    pub async fn index(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        index::index(self, request).await
    }

    // 上传截图并渲染确认页
    pub async fn analyze(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        analyze::analyze(self, request, payload).await
    }

    // 保存确认后的提交
    pub async fn submit(
        &self,
        request: &HttpRequest,
        form: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit(self, request, form).await
    }

    // 排行榜
    pub async fn leaderboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        leaderboard::leaderboard(self, request).await
    }

    // 排行榜 JSON 接口
    pub async fn leaderboard_api(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        leaderboard::leaderboard_api(self, request).await
    }
}

/// POST 之后统一用 303 跳转
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
