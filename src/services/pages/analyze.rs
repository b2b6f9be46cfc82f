use actix_multipart::{Field, Multipart};
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::io::Write;
use tracing::{debug, error, info};

use super::{PageService, see_other};
use crate::errors::StepboardError;
use crate::media::MediaStore;
use crate::models::submissions::requests::IntakeForm;
use crate::templates::Page;

const SCREENSHOT_FIELD: &str = "screenshot";

/// 请求头声明的长度
fn declared_length(request: &HttpRequest) -> Option<usize> {
    request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
}

/// 确认页上展示用户原始填写的日期
fn intake_dates_label(user_dates: &str) -> &str {
    if user_dates.is_empty() {
        "(left blank)"
    } else {
        user_dates
    }
}

fn too_large(max_size: usize) -> StepboardError {
    StepboardError::payload_too_large(format!("Request body exceeds {max_size} bytes"))
}

/// 读取普通文本字段，同时累计请求体大小
async fn read_text_field(
    field: &mut Field,
    total_size: &mut usize,
    max_size: usize,
) -> Result<Option<String>, actix_web::Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk?;
        *total_size += data.len();
        if *total_size > max_size {
            return Ok(None);
        }
        buf.extend_from_slice(&data);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

enum SaveOutcome {
    Saved(String),
    TooLarge,
    Failed(StepboardError),
}

/// 把截图字段流式写入上传目录，任何失败都会删除写了一半的文件
async fn save_screenshot(
    media: &MediaStore,
    field: &mut Field,
    original_name: &str,
    total_size: &mut usize,
    max_size: usize,
) -> SaveOutcome {
    let mut stored = match media.create(original_name) {
        Ok(stored) => stored,
        Err(e) => return SaveOutcome::Failed(e),
    };

    while let Some(chunk) = field.next().await {
        let data = match chunk {
            Ok(data) => data,
            Err(e) => {
                media.discard(&stored.public_path);
                return SaveOutcome::Failed(StepboardError::file_operation(format!(
                    "Upload stream interrupted: {e}"
                )));
            }
        };

        // 校验大小
        *total_size += data.len();
        if *total_size > max_size {
            media.discard(&stored.public_path);
            return SaveOutcome::TooLarge;
        }

        if let Err(e) = stored.file.write_all(&data) {
            media.discard(&stored.public_path);
            return SaveOutcome::Failed(e.into());
        }
    }

    info!(
        "Stored screenshot {:?} as {}",
        original_name, stored.stored_name
    );
    SaveOutcome::Saved(stored.public_path)
}

pub async fn analyze(
    service: &PageService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = service.get_config(request);
    let media = service.get_media_store(request);
    let max_size = config.server.limits.max_payload_size;

    if !media.is_writable() {
        let err = StepboardError::upload_disabled(format!(
            "Upload directory {} is not writable",
            media.dir()
        ));
        return service.error_page(request, &err);
    }

    // 声明长度超限时不读取请求体
    if let Some(length) = declared_length(request)
        && length > max_size
    {
        debug!("Rejected upload with Content-Length {}", length);
        return service.error_page(request, &too_large(max_size));
    }

    let mut form = IntakeForm::default();
    let mut screenshot_path: Option<String> = None;
    let mut total_size: usize = 0;

    loop {
        // 请求体损坏时整体拒绝，已保存的截图一并删除
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                debug!("Malformed multipart payload: {}", e);
                if let Some(path) = &screenshot_path {
                    media.discard(path);
                }
                return Err(e.into());
            }
        };

        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        if name == SCREENSHOT_FIELD && screenshot_path.is_none() {
            let original_name = file_name.unwrap_or_default();

            // 文件名为空或扩展名不在白名单内，直接回到上传页
            if original_name.is_empty() || !media.is_allowed(&original_name) {
                debug!("Rejected upload {:?}", original_name);
                return Ok(see_other("/"));
            }

            match save_screenshot(&media, &mut field, &original_name, &mut total_size, max_size)
                .await
            {
                SaveOutcome::Saved(path) => screenshot_path = Some(path),
                SaveOutcome::TooLarge => {
                    return service.error_page(request, &too_large(max_size));
                }
                SaveOutcome::Failed(e) => {
                    error!("{}", e);
                    return service.error_page(request, &e);
                }
            }
        } else {
            let value = match read_text_field(&mut field, &mut total_size, max_size).await {
                Ok(Some(value)) => value,
                Ok(None) => {
                    if let Some(path) = &screenshot_path {
                        media.discard(path);
                    }
                    return service.error_page(request, &too_large(max_size));
                }
                Err(e) => {
                    if let Some(path) = &screenshot_path {
                        media.discard(path);
                    }
                    return Err(e);
                }
            };
            form.set_field(&name, value);
        }
    }

    let Some(screenshot_path) = screenshot_path else {
        debug!("No screenshot in upload payload");
        return Ok(see_other("/"));
    };

    let analyzer = service.get_analyzer(request);
    let user_dates = form.dates.clone().unwrap_or_default();
    let result = analyzer.analyze(&screenshot_path, &user_dates).await;
    debug!(
        "Analyzer {} suggested {} steps for {}",
        analyzer.name(),
        result.steps,
        screenshot_path
    );

    let page = Page::new("verify.html", "Verify")
        .set("image_url", media.url_for(&screenshot_path))
        .set("raw_text", &result.raw_text)
        .set("name", form.name.unwrap_or_default())
        .set("submission_type", form.submission_type.unwrap_or_default())
        .set("dates", &result.dates)
        .set("intake_dates", intake_dates_label(&user_dates))
        .set("steps", result.steps.to_string())
        .set("comment", form.comment.unwrap_or_default())
        .set("screenshot_path", &screenshot_path);

    service.render(request, StatusCode::OK, page)
}
