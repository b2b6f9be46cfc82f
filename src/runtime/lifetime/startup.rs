use actix_web::web;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::analysis::{Analyzer, MockAnalyzer};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::media::MediaStore;
use crate::routes;
use crate::storage::Storage;

pub struct StartupContext {
    pub config: AppConfig,
    pub storage: Arc<dyn Storage>,
    pub media: Arc<MediaStore>,
    pub analyzer: Arc<dyn Analyzer>,
}

impl StartupContext {
    /// 注册共享数据与全部路由，服务器和测试共用
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let upload_prefix = self.media.url_prefix();

        cfg.app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.media.clone()))
            .app_data(web::Data::new(self.analyzer.clone()))
            .configure(routes::configure_page_routes) // 配置页面路由
            .configure(routes::configure_api_routes) // 配置 JSON 接口路由
            .configure(|cfg| routes::configure_media_routes(cfg, &upload_prefix)); // 配置截图与静态资源路由
    }
}

/// 准备服务器启动的上下文
/// 包括存储、上传目录和分析器
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    // 上传目录不可写时降级为只读模式，不中断启动
    let media = Arc::new(MediaStore::prepare(config.upload.clone()));
    if media.is_writable() {
        warn!("Media store ready at {}", media.dir());
    } else {
        warn!(
            "Media store at {} is read-only, serving without upload capability",
            media.dir()
        );
    }

    let analyzer: Arc<dyn Analyzer> = Arc::new(MockAnalyzer);
    debug!("Using {} analyzer", analyzer.name());

    Ok(StartupContext {
        config: config.clone(),
        storage,
        media,
        analyzer,
    })
}
