use chrono::{DateTime, TimeZone};
use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("Invalid filename regex"));

/// 清理上传文件名
///
/// 非 ASCII 字符先转写为 ASCII，路径分隔符视为空白，空白折叠为下划线，
/// 其余不安全字符直接删除，最后去掉首尾的点号和下划线。
/// 结果可能为空字符串，由调用方决定回退名称。
pub fn secure_filename(filename: &str) -> String {
    let ascii = deunicode(filename).replace(['/', '\\'], " ");
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    UNSAFE_CHARS_RE
        .replace_all(&joined, "")
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// 提取小写扩展名（不含点号）
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// 扩展名白名单校验（忽略大小写）
pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    match extension_of(filename) {
        Some(ext) => allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}

/// 生成 `YYYYMMDDHHMMSS_<安全文件名>` 形式的存储文件名
pub fn timestamped_filename<Tz: TimeZone>(original: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut safe = secure_filename(original);
    if safe.is_empty() || !safe.contains('.') {
        // 清理后丢失了主名或扩展名
        let ext = extension_of(original)
            .map(|e| secure_filename(&e))
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "bin".to_string());
        safe = format!("upload.{ext}");
    }
    format!("{}_{}", now.format("%Y%m%d%H%M%S"), safe)
}
