use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PageService;
use crate::templates::Page;

pub async fn index(service: &PageService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let media = service.get_media_store(request);

    let notice = if media.is_writable() {
        String::new()
    } else {
        r#"<p class="notice">Screenshot uploads are temporarily unavailable.</p>"#.to_string()
    };

    let page = Page::new("index.html", "Submit").set_raw("upload_notice", notice);
    service.render(request, StatusCode::OK, page)
}
