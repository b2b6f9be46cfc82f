use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::MediaService;
use crate::templates::{get_file, get_mime_type, should_cache};

pub async fn serve_upload(
    service: &MediaService,
    request: &HttpRequest,
    file_name: String,
) -> ActixResult<HttpResponse> {
    let media = service.get_media_store(request);

    let Some(path) = media.resolve(&file_name) else {
        return Ok(HttpResponse::NotFound().finish());
    };

    match std::fs::read(&path) {
        Ok(data) => Ok(HttpResponse::Ok()
            .content_type(get_mime_type(&file_name))
            .body(data)),
        Err(e) => {
            warn!("Failed to read upload {}: {}", path.display(), e);
            Ok(HttpResponse::NotFound().finish())
        }
    }
}

pub async fn serve_asset(path: String) -> ActixResult<HttpResponse> {
    let path = path.trim_start_matches('/');
    if path.contains("..") {
        return Ok(HttpResponse::NotFound().finish());
    }

    let asset_path = format!("assets/{path}");
    match get_file(&asset_path) {
        Some(data) => {
            let mut response = HttpResponse::Ok();
            response.content_type(get_mime_type(&asset_path));

            // 设置缓存头
            if should_cache(&asset_path) {
                response.insert_header(("Cache-Control", "public, max-age=86400"));
            }

            Ok(response.body(data))
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}
