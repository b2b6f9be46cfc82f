pub mod analysis;
pub mod common;
pub mod submissions;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

// 程序启动时间，用于健康检查上报运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
