pub mod serve;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::media::MediaStore;

pub struct MediaService;

impl MediaService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_media_store(&self, request: &HttpRequest) -> Arc<MediaStore> {
        request
            .app_data::<web::Data<Arc<MediaStore>>>()
            .expect("MediaStore not found in app data")
            .get_ref()
            .clone()
    }

    // 读取已上传的截图
    pub async fn serve_upload(
        &self,
        request: &HttpRequest,
        file_name: String,
    ) -> ActixResult<HttpResponse> {
        serve::serve_upload(self, request, file_name).await
    }

    // 读取嵌入的静态资源
    pub async fn serve_asset(&self, path: String) -> ActixResult<HttpResponse> {
        serve::serve_asset(path).await
    }
}
