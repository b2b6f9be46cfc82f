use serde::{Deserialize, Serialize};

/// 一条已确认的步数提交
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub name: String,
    pub submission_type: String,
    // 用户填写的日期文本，不做日历校验
    pub dates: String,
    pub steps: i64,
    pub comment: Option<String>,
    // 上传目录下的相对路径，同时用作图片 URL
    pub screenshot_path: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
