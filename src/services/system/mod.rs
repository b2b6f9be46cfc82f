use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::sync::Arc;

use crate::media::MediaStore;
use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: i64,
    pub uploads_enabled: bool,
}

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 存活检查，附带上传目录是否可写
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let uploads_enabled = request
            .app_data::<web::Data<Arc<MediaStore>>>()
            .map(|media| media.is_writable())
            .unwrap_or(false);

        let uptime_seconds = request
            .app_data::<web::Data<AppStartTime>>()
            .map(|start| {
                chrono::Utc::now()
                    .signed_duration_since(start.start_datetime)
                    .num_seconds()
            })
            .unwrap_or_default();

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            HealthResponse {
                status: "ok",
                version: env!("CARGO_PKG_VERSION"),
                uptime_seconds,
                uploads_enabled,
            },
            "Service is healthy",
        )))
    }
}
