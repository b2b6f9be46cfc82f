use serde::Serialize;

use super::entities::Submission;

/// 排行榜中的一行
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub submission_type: String,
    pub dates: String,
    pub steps: i64,
    pub comment: Option<String>,
    pub screenshot_path: Option<String>,
    pub created_at: String,
}

impl From<Submission> for LeaderboardEntry {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            name: s.name,
            submission_type: s.submission_type,
            dates: s.dates,
            steps: s.steps,
            comment: s.comment,
            screenshot_path: s.screenshot_path,
            created_at: s.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// 排行榜响应（按提交时间倒序）
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub total: usize,
    pub items: Vec<LeaderboardEntry>,
}

impl From<Vec<Submission>> for LeaderboardResponse {
    fn from(submissions: Vec<Submission>) -> Self {
        let items: Vec<LeaderboardEntry> = submissions.into_iter().map(Into::into).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}
