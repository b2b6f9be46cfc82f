use serde::Serialize;

/// 截图分析结果
///
/// 只存在于上传与确认之间，通过确认页表单往返，不落库。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub steps: i64,
    pub dates: String,
    pub raw_text: String,
}
