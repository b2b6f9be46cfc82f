use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::services::PageService;

// 懒加载的全局 PageService 实例
static PAGE_SERVICE: Lazy<PageService> = Lazy::new(PageService::new_lazy);

pub async fn index(request: HttpRequest) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.index(&request).await
}

pub async fn analyze(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.analyze(&request, payload).await
}

pub async fn submit(
    request: HttpRequest,
    form: web::Form<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.submit(&request, form.into_inner()).await
}

pub async fn leaderboard(request: HttpRequest) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.leaderboard(&request).await
}

// 配置路由
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/analyze", web::post().to(analyze))
        .route("/submit", web::post().to(submit))
        .route("/leaderboard", web::get().to(leaderboard));
}
