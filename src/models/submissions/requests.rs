use serde::Deserialize;

/// 上传页随截图一起提交的表单字段
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    pub name: Option<String>,
    pub submission_type: Option<String>,
    pub dates: Option<String>,
    pub comment: Option<String>,
}

impl IntakeForm {
    /// 按 multipart 字段名写入，未知字段忽略
    pub fn set_field(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = Some(value),
            "submission_type" => self.submission_type = Some(value),
            "dates" => self.dates = Some(value),
            "comment" => self.comment = Some(value),
            _ => {}
        }
    }
}

/// 确认页提交的表单
///
/// 所有字段原样透传给存储层：缺失字段和非数字步数都由存储层拒绝，
/// 这里不做任何预校验。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSubmissionRequest {
    pub name: Option<String>,
    pub submission_type: Option<String>,
    pub dates: Option<String>,
    pub steps: Option<String>,
    pub comment: Option<String>,
    pub screenshot_path: Option<String>,
}
