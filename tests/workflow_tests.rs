//! 上传、确认、提交、排行榜的完整流程测试

use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use std::path::Path;

use stepboard::config::AppConfig;
use stepboard::runtime::lifetime::startup::{StartupContext, prepare_server_startup};

const BOUNDARY: &str = "----stepboard-test-boundary";
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake image body";

/// 内存数据库 + 临时上传目录
async fn context_in(tmp: &Path, max_payload_size: usize) -> StartupContext {
    let mut config = AppConfig::default();
    config.database.url = ":memory:".to_string();
    config.upload.dir = tmp.join("uploads").to_string_lossy().into_owned();
    config.server.limits.max_payload_size = max_payload_size;

    prepare_server_startup(&config)
        .await
        .expect("Failed to prepare startup context")
}

fn text_part(body: &mut Vec<u8>, name: &str, value: &str) {
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
}

fn file_part(body: &mut Vec<u8>, file_name: &str, data: &[u8]) {
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"screenshot\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");
}

fn close_parts(body: &mut Vec<u8>) {
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
}

/// 手工拼装 multipart 请求体，文本字段在前，截图在后
fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        text_part(&mut body, name, value);
    }
    if let Some((file_name, data)) = file {
        file_part(&mut body, file_name, data);
    }
    close_parts(&mut body);
    body
}

fn analyze_request(body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/analyze")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

fn submit_request(fields: &[(&str, &str)]) -> test::TestRequest {
    test::TestRequest::post().uri("/submit").set_form(fields)
}

fn uploaded_files(tmp: &Path) -> Vec<String> {
    match std::fs::read_dir(tmp.join("uploads")) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn test_index_renders_upload_form() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("action=\"/analyze\""));
    assert!(body.contains("name=\"screenshot\""));
    assert!(!body.contains("temporarily unavailable"));
}

#[actix_web::test]
async fn test_allowed_upload_renders_verify_page() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let body = multipart_body(
        &[
            ("name", "Alice"),
            ("submission_type", "daily"),
            ("dates", "2024-01-01"),
            ("comment", "<b>hi</b>"),
        ],
        Some(("My Steps.PNG", PNG_BYTES)),
    );
    let resp = test::call_service(&app, analyze_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("value=\"Alice\""));
    assert!(html.contains("value=\"daily\""));
    assert!(html.contains("value=\"2024-01-01\""));
    assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    assert!(!html.contains("<b>hi</b>"));

    let files = uploaded_files(tmp.path());
    assert_eq!(files.len(), 1);
    let stored = &files[0];
    assert!(stored.ends_with("_My_Steps.PNG"), "unexpected name {stored}");
    assert_eq!(stored.find('_'), Some(14));
    assert!(stored[..14].chars().all(|c| c.is_ascii_digit()));
    assert!(html.contains(stored.as_str()));

    let data = std::fs::read(tmp.path().join("uploads").join(stored)).unwrap();
    assert_eq!(data, PNG_BYTES);
}

#[actix_web::test]
async fn test_every_allowed_extension_is_accepted() {
    for file_name in ["a.png", "b.jpg", "c.JPEG", "d.Gif"] {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let body = multipart_body(&[("name", "Bob")], Some((file_name, PNG_BYTES)));
        let resp = test::call_service(&app, analyze_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{file_name} rejected");
        assert_eq!(uploaded_files(tmp.path()).len(), 1);
    }
}

#[actix_web::test]
async fn test_disallowed_extension_redirects_without_writing() {
    for file_name in ["notes.txt", "setup.exe", "noextension"] {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let body = multipart_body(&[("name", "Eve")], Some((file_name, b"data")));
        let resp = test::call_service(&app, analyze_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/");
        assert!(uploaded_files(tmp.path()).is_empty());
    }
}

#[actix_web::test]
async fn test_missing_or_empty_file_redirects() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let no_file = multipart_body(&[("name", "Alice")], None);
    let resp = test::call_service(&app, analyze_request(no_file).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let empty_name = multipart_body(&[("name", "Alice")], Some(("", PNG_BYTES)));
    let resp = test::call_service(&app, analyze_request(empty_name).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    assert!(uploaded_files(tmp.path()).is_empty());
}

#[actix_web::test]
async fn test_oversized_upload_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let big = vec![0u8; 4096];
    let body = multipart_body(&[("name", "Alice")], Some(("big.png", &big)));
    let resp = test::call_service(&app, analyze_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(uploaded_files(tmp.path()).is_empty());
}

#[actix_web::test]
async fn test_streamed_oversized_file_is_discarded() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let big = vec![7u8; 8 * 1024];
    let body = multipart_body(&[("name", "Alice")], Some(("big.png", &big)));
    // 去掉 Content-Length，只能在流式读取时发现超限
    let mut req = analyze_request(body).to_request();
    req.headers_mut().remove(header::CONTENT_LENGTH);
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(uploaded_files(tmp.path()).is_empty());
}

#[actix_web::test]
async fn test_streamed_text_after_file_is_discarded() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let long_comment = "x".repeat(4000);
    let mut body = Vec::new();
    file_part(&mut body, "small.png", PNG_BYTES);
    text_part(&mut body, "comment", &long_comment);
    close_parts(&mut body);

    // 去掉 Content-Length，只能在流式读取时发现超限
    let mut req = analyze_request(body).to_request();
    req.headers_mut().remove(header::CONTENT_LENGTH);
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(uploaded_files(tmp.path()).is_empty());
}

#[actix_web::test]
async fn test_truncated_payload_after_file_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    // 截图完整，随后的字段头部被截断
    let mut body = Vec::new();
    file_part(&mut body, "steps.png", PNG_BYTES);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"comment\"\r\n");

    let resp = test::call_service(&app, analyze_request(body).to_request()).await;
    assert!(resp.status().is_client_error(), "got {}", resp.status());
    assert!(uploaded_files(tmp.path()).is_empty());
}

#[actix_web::test]
async fn test_verify_page_shows_entered_dates() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let body = multipart_body(&[("name", "Alice"), ("dates", "")], Some(("a.png", PNG_BYTES)));
    let resp = test::call_service(&app, analyze_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("<span class=\"intake-dates\">(left blank)</span>"));
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    assert!(html.contains(&format!("value=\"{today}\"")));

    let body = multipart_body(
        &[("name", "Alice"), ("dates", "last week")],
        Some(("b.png", PNG_BYTES)),
    );
    let resp = test::call_service(&app, analyze_request(body).to_request()).await;
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("<span class=\"intake-dates\">last week</span>"));
    assert!(html.contains("value=\"last week\""));
}

#[actix_web::test]
async fn test_submit_then_leaderboard() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let resp = test::call_service(
        &app,
        submit_request(&[
            ("name", "Alice"),
            ("submission_type", "daily"),
            ("dates", "2024-01-01"),
            ("steps", "9999"),
            ("comment", ""),
            ("screenshot_path", "static/uploads/20240101120000_a.png"),
        ])
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/leaderboard");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/leaderboard").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("<td>Alice</td>"));
    assert!(html.contains("<td>9999</td>"));
    assert!(html.contains("/static/uploads/20240101120000_a.png"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/leaderboard").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["code"], 0);
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["name"], "Alice");
    assert_eq!(json["data"]["items"][0]["type"], "daily");
    assert_eq!(json["data"]["items"][0]["steps"], 9999);
}

#[actix_web::test]
async fn test_leaderboard_lists_newest_first() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    for (name, steps) in [("First", "1000"), ("Second", "2000")] {
        let resp = test::call_service(
            &app,
            submit_request(&[
                ("name", name),
                ("submission_type", "weekly"),
                ("dates", "2024-01-01 to 2024-01-07"),
                ("steps", steps),
            ])
            .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/leaderboard").to_request(),
    )
    .await;
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["items"][0]["name"], "Second");
    assert_eq!(json["data"]["items"][1]["name"], "First");
}

#[actix_web::test]
async fn test_invalid_submission_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let non_numeric = submit_request(&[
        ("name", "Mallory"),
        ("submission_type", "daily"),
        ("dates", "2024-01-01"),
        ("steps", "lots"),
    ]);
    let resp = test::call_service(&app, non_numeric.to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(!html.contains("datatype mismatch"));

    let missing_name = submit_request(&[
        ("submission_type", "daily"),
        ("dates", "2024-01-01"),
        ("steps", "10"),
    ]);
    let resp = test::call_service(&app, missing_name.to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/leaderboard").to_request(),
    )
    .await;
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["data"]["total"], 0);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/leaderboard").to_request(),
    )
    .await;
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("No submissions yet."));
}

#[actix_web::test]
async fn test_uploaded_screenshot_is_served() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let body = multipart_body(&[("name", "Alice")], Some(("steps.png", PNG_BYTES)));
    let resp = test::call_service(&app, analyze_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stored = uploaded_files(tmp.path()).remove(0);
    let url = ctx.media.url_for(&format!("{}/{}", ctx.media.dir(), stored));

    let resp = test::call_service(&app, test::TestRequest::get().uri(&url).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    assert_eq!(test::read_body(resp).await.as_ref(), PNG_BYTES);

    let missing = format!("/{}/missing.png", ctx.media.url_prefix());
    let resp = test::call_service(&app, test::TestRequest::get().uri(&missing).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_read_only_upload_dir_degrades() {
    let tmp = tempfile::tempdir().unwrap();
    // 上传目录的父路径是普通文件，目录无法创建
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();
    let ctx = context_in(&blocker, 16 * 1024 * 1024).await;
    assert!(!ctx.media.is_writable());
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("temporarily unavailable"));

    let body = multipart_body(&[("name", "Alice")], Some(("steps.png", PNG_BYTES)));
    let resp = test::call_service(&app, analyze_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["data"]["uploads_enabled"], false);
}

#[actix_web::test]
async fn test_health_and_assets() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context_in(tmp.path(), 16 * 1024 * 1024).await;
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["uploads_enabled"], true);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/assets/style.css")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/assets/../Cargo.toml")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
