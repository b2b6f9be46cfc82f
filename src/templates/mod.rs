//! 页面模板
//!
//! 使用 rust-embed 在编译期嵌入 `templates/` 目录，支持：
//! - `./templates-custom/` 目录覆盖嵌入文件（开发用）
//! - `{{key}}` 占位符替换，默认对值做 HTML 转义
//! - 所有页面共用 `layout.html` 外壳

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rust_embed::Embed;
use std::collections::HashMap;
use std::path::Path;

use crate::errors::{Result, StepboardError};
use crate::utils::escape_html;

/// 嵌入页面模板与静态资源
#[derive(Embed)]
#[folder = "templates/"]
struct PageAssets;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").expect("Invalid placeholder regex"));

const LAYOUT: &str = "layout.html";

/// 获取文件的 MIME 类型
pub fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// 检查是否应该设置长期缓存
pub fn should_cache(path: &str) -> bool {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    matches!(ext, "css" | "js" | "png" | "svg" | "ico")
}

/// 尝试从自定义目录读取文件（开发用）
fn try_custom_file(path: &str) -> Option<Vec<u8>> {
    let custom_path = format!("./templates-custom/{}", path);
    std::fs::read(&custom_path).ok()
}

/// 尝试从嵌入的资源中获取文件
fn get_embedded_file(path: &str) -> Option<Vec<u8>> {
    PageAssets::get(path).map(|f| f.data.to_vec())
}

/// 获取文件内容（优先自定义目录，然后嵌入资源）
pub fn get_file(path: &str) -> Option<Vec<u8>> {
    try_custom_file(path).or_else(|| get_embedded_file(path))
}

fn load_template(name: &str) -> Result<String> {
    get_file(name)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .ok_or_else(|| StepboardError::template(format!("Template {name} not found")))
}

/// 单次扫描替换占位符，替换进去的值不会被再次展开
fn fill(template: &str, values: &HashMap<&'static str, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// 一个待渲染的页面
pub struct Page {
    template: &'static str,
    title: String,
    values: HashMap<&'static str, String>,
}

impl Page {
    pub fn new(template: &'static str, title: impl Into<String>) -> Self {
        Self {
            template,
            title: title.into(),
            values: HashMap::new(),
        }
    }

    /// 设置占位符，值会被转义
    pub fn set(mut self, key: &'static str, value: impl AsRef<str>) -> Self {
        self.values.insert(key, escape_html(value.as_ref()));
        self
    }

    /// 设置已经是 HTML 的占位符
    pub fn set_raw(mut self, key: &'static str, html: impl Into<String>) -> Self {
        self.values.insert(key, html.into());
        self
    }

    pub fn render(self, system_name: &str) -> Result<String> {
        let body = fill(&load_template(self.template)?, &self.values);

        let mut shell = HashMap::new();
        shell.insert("title", escape_html(&self.title));
        shell.insert("system_name", escape_html(system_name));
        shell.insert("content", body);

        Ok(fill(&load_template(LAYOUT)?, &shell))
    }
}
