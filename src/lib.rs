//! Stepboard - 步数截图提交与排行榜
//!
//! 基于 Actix Web 的服务端渲染应用：上传截图 -> 模拟分析 -> 用户确认 -> 入库 -> 排行榜。
//!
//! # 架构
//! - `analysis`: 截图分析接口与占位实现
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `media`: 上传目录管理
//! - `models`: 数据模型定义
//! - `routes`: 路由层
//! - `runtime`: 启动、关闭与日志初始化
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `templates`: 嵌入式页面模板
//! - `utils`: 工具函数

pub mod analysis;
pub mod config;
pub mod entity;
pub mod errors;
pub mod media;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod templates;
pub mod utils;
