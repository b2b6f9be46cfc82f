//! 统一错误处理模块
//!
//! 存储、媒体目录与页面渲染共用同一个错误枚举。
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use actix_web::http::StatusCode;
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_stepboard_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum StepboardError {
            $($variant(String),)*
        }

        impl StepboardError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(StepboardError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(StepboardError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(StepboardError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl StepboardError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        StepboardError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_stepboard_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    NotFound("E005", "Resource Not Found"),
    Template("E006", "Template Rendering Error"),
    PayloadTooLarge("E007", "Payload Too Large"),
    UploadDisabled("E008", "Upload Disabled"),
}

impl StepboardError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            StepboardError::NotFound(_) => StatusCode::NOT_FOUND,
            StepboardError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            StepboardError::UploadDisabled(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for StepboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for StepboardError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for StepboardError {
    fn from(err: sea_orm::DbErr) -> Self {
        StepboardError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for StepboardError {
    fn from(err: std::io::Error) -> Self {
        StepboardError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StepboardError>;
