use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 步数提交方法
    // 写入一条确认后的提交，每次调用都新增一行
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission>;
    // 按提交时间倒序列出全部提交
    async fn list_submissions(&self) -> Result<Vec<Submission>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
