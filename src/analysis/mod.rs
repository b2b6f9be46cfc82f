//! 截图分析
//!
//! `Analyzer` 是处理器与具体识别实现之间的接缝。当前唯一实现 `MockAnalyzer`
//! 不读取图片，只给出一个看起来合理的步数供用户在确认页修改。

use async_trait::async_trait;
use rand::Rng;

use crate::models::analysis::entities::AnalysisResult;

pub const MIN_MOCK_STEPS: i64 = 5_000;
pub const MAX_MOCK_STEPS: i64 = 15_000;
const MOCK_RAW_TEXT: &str = "Mock OCR Text: ... 10,234 steps ...";

#[async_trait]
pub trait Analyzer: Send + Sync {
    /// 分析已保存的截图；不得失败
    async fn analyze(&self, image_path: &str, user_dates: &str) -> AnalysisResult;

    fn name(&self) -> &'static str;
}

/// 占位分析器
#[derive(Debug, Default, Clone, Copy)]
pub struct MockAnalyzer;

impl MockAnalyzer {
    fn suggest_steps() -> i64 {
        rand::rng().random_range(MIN_MOCK_STEPS..=MAX_MOCK_STEPS)
    }

    /// 用户填写的日期原样返回，为空时取今天
    fn detect_dates(user_dates: &str) -> String {
        if user_dates.is_empty() {
            chrono::Local::now().format("%Y-%m-%d").to_string()
        } else {
            user_dates.to_string()
        }
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, image_path: &str, user_dates: &str) -> AnalysisResult {
        tracing::debug!("Mock analysis of {}", image_path);

        AnalysisResult {
            steps: Self::suggest_steps(),
            dates: Self::detect_dates(user_dates),
            raw_text: MOCK_RAW_TEXT.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
