use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::MediaService;

// 懒加载的全局 MediaService 实例
static MEDIA_SERVICE: Lazy<MediaService> = Lazy::new(MediaService::new_lazy);

pub async fn serve_upload(
    request: HttpRequest,
    file_name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE
        .serve_upload(&request, file_name.into_inner())
        .await
}

pub async fn serve_asset(path: web::Path<String>) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.serve_asset(path.into_inner()).await
}

/// 配置截图与静态资源路由
///
/// 截图挂载在上传目录同名的 URL 前缀下，与 screenshot_path 列中的路径一致。
pub fn configure_media_routes(cfg: &mut web::ServiceConfig, upload_prefix: &str) {
    cfg.route(
        &format!("/{upload_prefix}/{{file_name}}"),
        web::get().to(serve_upload),
    )
    .route("/assets/{tail:.*}", web::get().to(serve_asset));
}
