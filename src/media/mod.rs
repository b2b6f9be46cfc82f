//! 截图存储目录
//!
//! 上传的截图以 `YYYYMMDDHHMMSS_<文件名>` 写入配置的上传目录。
//! 记录到数据库的路径是 `<上传目录>/<存储文件名>`，页面直接把它当作图片 URL 使用，
//! 因此同一前缀也挂载为静态文件路由。

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::UploadConfig;
use crate::errors::{Result, StepboardError};
use crate::utils::{has_allowed_extension, timestamped_filename};

const WRITE_PROBE_NAME: &str = ".stepboard-write-probe";

/// 已创建的上传文件
pub struct StoredFile {
    pub file: File,
    pub stored_name: String,
    // 相对路径形式，写入 screenshot_path 列
    pub public_path: String,
}

#[derive(Debug)]
pub struct MediaStore {
    config: UploadConfig,
    writable: bool,
}

impl MediaStore {
    /// 准备上传目录并检测是否可写
    ///
    /// 只读文件系统上创建目录失败不会中断启动，`is_writable()` 返回 false，
    /// 由调用方决定降级还是退出。
    pub fn prepare(config: UploadConfig) -> Self {
        let dir = Path::new(&config.dir);

        if !dir.exists()
            && let Err(e) = fs::create_dir_all(dir)
        {
            warn!("Failed to create upload directory {}: {}", config.dir, e);
        }

        let writable = Self::probe_writable(dir);
        if writable {
            debug!("Upload directory {} is writable", config.dir);
        } else {
            warn!(
                "Upload directory {} is not writable, uploads are disabled",
                config.dir
            );
        }

        Self { config, writable }
    }

    fn probe_writable(dir: &Path) -> bool {
        let probe = dir.join(WRITE_PROBE_NAME);
        match File::create(&probe) {
            Ok(_) => {
                let _ = fs::remove_file(&probe);
                true
            }
            Err(_) => false,
        }
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn dir(&self) -> &str {
        &self.config.dir
    }

    /// 原始文件名是否在扩展名白名单内
    pub fn is_allowed(&self, original_name: &str) -> bool {
        has_allowed_extension(original_name, &self.config.allowed_types)
    }

    /// 上传目录作为 URL 时的前缀，不含首尾斜杠
    pub fn url_prefix(&self) -> String {
        url_path(&self.config.dir)
    }

    /// 把数据库里记录的路径转换为页面可用的 URL
    pub fn url_for(&self, public_path: &str) -> String {
        format!("/{}", url_path(public_path))
    }

    /// 以当前本地时间为前缀创建上传文件
    pub fn create(&self, original_name: &str) -> Result<StoredFile> {
        if !self.writable {
            return Err(StepboardError::upload_disabled(format!(
                "Upload directory {} is not writable",
                self.config.dir
            )));
        }

        let stored_name = timestamped_filename(original_name, &chrono::Local::now());
        let public_path = format!("{}/{}", self.config.dir.trim_end_matches('/'), stored_name);
        let file = File::create(&public_path)?;

        Ok(StoredFile {
            file,
            stored_name,
            public_path,
        })
    }

    /// 删除写了一半的文件（超出大小限制等）
    pub fn discard(&self, public_path: &str) {
        if let Err(e) = fs::remove_file(public_path) {
            warn!("Failed to remove partial upload {}: {}", public_path, e);
        }
    }

    /// 解析待下载的存储文件名，拒绝任何路径穿越
    pub fn resolve(&self, stored_name: &str) -> Option<PathBuf> {
        if stored_name.is_empty()
            || stored_name.starts_with('.')
            || stored_name.contains(['/', '\\'])
            || stored_name.contains("..")
        {
            return None;
        }

        let path = Path::new(&self.config.dir).join(stored_name);
        path.is_file().then_some(path)
    }
}

fn url_path(path: &str) -> String {
    path.trim_start_matches("./")
        .trim_matches('/')
        .to_string()
}
