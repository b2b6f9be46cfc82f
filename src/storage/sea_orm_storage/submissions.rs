//! 步数提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{Result, StepboardError};
use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};
use sea_orm::{EntityTrait, NotSet, QueryOrder, Set};

/// 对应表结构中的 NOT NULL 约束
fn required(value: Option<String>, column: &str) -> Result<String> {
    value.ok_or_else(|| {
        StepboardError::database_operation(format!(
            "NOT NULL constraint failed: submissions.{column}"
        ))
    })
}

/// 对应 steps 列的 INTEGER 类型
fn parse_steps(value: Option<String>) -> Result<i64> {
    let raw = required(value, "steps")?;
    raw.trim().parse::<i64>().map_err(|_| {
        StepboardError::database_operation(format!(
            "datatype mismatch: submissions.steps expects INTEGER, got {raw:?}"
        ))
    })
}

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(required(req.name, "name")?),
            submission_type: Set(required(req.submission_type, "submission_type")?),
            dates: Set(required(req.dates, "dates")?),
            steps: Set(parse_steps(req.steps)?),
            comment: Set(req.comment),
            screenshot_path: Set(req.screenshot_path),
            // created_at 由数据库默认值填充
            created_at: NotSet,
        };

        let inserted = Submissions::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| {
                StepboardError::database_operation(format!("Failed to create submission: {e}"))
            })?;

        let result = Submissions::find_by_id(inserted.last_insert_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                StepboardError::database_operation(format!("Failed to load submission: {e}"))
            })?
            .ok_or_else(|| {
                StepboardError::not_found(format!(
                    "Submission {} vanished after insert",
                    inserted.last_insert_id
                ))
            })?;

        Ok(result.into_submission())
    }

    /// 列出全部提交，最新的在前
    pub async fn list_submissions_impl(&self) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                StepboardError::database_operation(format!("Failed to list submissions: {e}"))
            })?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }
}
