use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::{PageService, SystemService};

// 懒加载的全局服务实例
static PAGE_SERVICE: Lazy<PageService> = Lazy::new(PageService::new_lazy);
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn leaderboard(request: HttpRequest) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.leaderboard_api(&request).await
}

pub async fn health(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.health(&request).await
}

// 配置路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/leaderboard", web::get().to(leaderboard))
            .route("/health", web::get().to(health)),
    );
}
