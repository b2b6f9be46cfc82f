use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::PageService;
use crate::media::MediaStore;
use crate::models::submissions::{entities::Submission, responses::LeaderboardResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::templates::Page;
use crate::utils::escape_html;

fn render_row(media: &MediaStore, s: &Submission) -> String {
    let screenshot = match s.screenshot_path.as_deref() {
        Some(path) if !path.is_empty() => {
            let url = escape_html(&media.url_for(path));
            format!(r#"<a href="{url}"><img src="{url}" alt="screenshot"></a>"#)
        }
        _ => String::new(),
    };

    format!(
        "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape_html(&s.name),
        escape_html(&s.submission_type),
        escape_html(&s.dates),
        s.steps,
        escape_html(s.comment.as_deref().unwrap_or_default()),
        s.created_at.format("%Y-%m-%d %H:%M:%S"),
        screenshot,
    )
}

pub async fn leaderboard(
    service: &PageService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let media = service.get_media_store(request);

    let submissions = match storage.list_submissions().await {
        Ok(submissions) => submissions,
        Err(e) => {
            error!("Failed to load leaderboard: {}", e);
            return service.error_page(request, &e);
        }
    };

    let rows = if submissions.is_empty() {
        r#"        <tr><td colspan="7" class="muted">No submissions yet.</td></tr>"#.to_string()
    } else {
        submissions
            .iter()
            .map(|s| render_row(&media, s))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let page = Page::new("leaderboard.html", "Leaderboard")
        .set("total", submissions.len().to_string())
        .set_raw("rows", rows);
    service.render(request, StatusCode::OK, page)
}

/// 排行榜 JSON 版本，数据与页面一致
pub async fn leaderboard_api(
    service: &PageService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_submissions().await {
        Ok(submissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            LeaderboardResponse::from(submissions),
            "Leaderboard retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to load leaderboard: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::DatabaseError,
                    "Failed to load leaderboard",
                )),
            )
        }
    }
}
