//! End-to-end tests for the HTTP surface, driven without AI configured so
//! every AI stage degrades to its placeholder path.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use quickdrop_core::Config;
use std::time::Duration;

fn test_config(upload_dir: &std::path::Path) -> Config {
    Config {
        server_port: 0,
        base_url: "http://localhost:3000".to_string(),
        upload_dir: upload_dir.to_string_lossy().to_string(),
        link_ttl: Duration::from_secs(900),
        cleanup_interval: Duration::from_secs(60),
        max_upload_size_bytes: 25 * 1024 * 1024,
        google_api_key: None,
        gemini_model: "gemini-2.0-flash".to_string(),
        qr_enabled: true,
        filename_suggestion_enabled: true,
        file_type_check_enabled: true,
    }
}

async fn test_server() -> (TestServer, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server_with(test_config(dir.path())).await;
    (server, dir)
}

async fn test_server_with(config: Config) -> TestServer {
    let (_state, router) = quickdrop_api::setup::initialize_app(config).await.unwrap();
    TestServer::new(router).unwrap()
}

fn upload_form(filename: &str, content_type: &str, data: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data.to_vec())
            .file_name(filename)
            .mime_type(content_type),
    )
}

/// Pull the 8-char link id out of the rendered share page.
fn extract_link_id(html: &str) -> String {
    let marker = "http://localhost:3000/";
    let start = html.find(marker).expect("share link missing from page") + marker.len();
    html[start..start + 8].to_string()
}

#[tokio::test]
async fn test_upload_then_download_roundtrip() {
    let (server, _dir) = test_server().await;
    let contents = b"hello from quickdrop";

    let response = server
        .post("/")
        .multipart(upload_form("hello.txt", "text/plain", contents))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains("Share link"));
    let id = extract_link_id(&html);

    let download = server.get(&format!("/{id}")).await;
    assert_eq!(download.status_code(), StatusCode::OK);
    assert_eq!(download.as_bytes().as_ref(), &contents[..]);

    let disposition = download
        .headers()
        .get("content-disposition")
        .expect("content-disposition missing")
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("hello.txt"));
}

#[tokio::test]
async fn test_download_unknown_id_is_404() {
    let (server, _dir) = test_server().await;

    let response = server.get("/nosuchid").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Invalid or expired link");
}

#[tokio::test]
async fn test_upload_without_file_reports_error() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/")
        .multipart(MultipartForm::new().add_text("note", "no file here"))
        .await;
    assert!(response.text().contains("No file selected"));
}

#[tokio::test]
async fn test_executable_upload_is_blocked() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/")
        .multipart(upload_form(
            "tool.bin",
            "application/octet-stream",
            b"MZ\x90\x00rest-of-a-pe-file",
        ))
        .await;

    let html = response.text();
    assert!(html.contains("Malicious or unsupported file detected."));
    assert!(!html.contains("Share link"));
}

#[tokio::test]
async fn test_oversized_upload_is_413() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.max_upload_size_bytes = 1024;
    let server = test_server_with(config).await;

    let big = vec![b'a'; 10 * 1024];
    let response = server
        .post("/")
        .multipart(upload_form("big.txt", "text/plain", &big))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.text(), "File is too large. Max limit is 25 MB.");
}

#[tokio::test]
async fn test_qr_image_is_served() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/")
        .multipart(upload_form("qr-me.txt", "text/plain", b"some text"))
        .await;
    let html = response.text();

    let marker = "src=\"/uploads/";
    let start = html.find(marker).expect("QR image missing from page") + "src=\"".len();
    let end = html[start..].find('"').unwrap() + start;
    let qr_url = &html[start..end];

    let qr = server.get(qr_url).await;
    assert_eq!(qr.status_code(), StatusCode::OK);
    assert_eq!(
        qr.headers().get("content-type").unwrap().to_str().unwrap(),
        "image/png"
    );
    assert!(qr.as_bytes().starts_with(&[0x89, 0x50, 0x4E, 0x47]));
}

#[tokio::test]
async fn test_stored_uploads_are_not_served_directly() {
    let (server, dir) = test_server().await;

    // a file sitting in the uploads directory that is not a QR image
    std::fs::write(dir.path().join("secret.txt"), b"private contents").unwrap();

    let response = server.get("/uploads/secret.txt").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "File not found");
}

#[tokio::test]
async fn test_ask_ai_blank_question_is_400() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/ask_ai")
        .json(&serde_json::json!({ "question": "   " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["answer"], "Please ask a valid question.");
}

#[tokio::test]
async fn test_ask_ai_without_uploads_reports_no_context() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/ask_ai")
        .json(&serde_json::json!({ "question": "what is this file about?" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["answer"], "No uploaded file found for context.");
}

#[tokio::test]
async fn test_ask_ai_degrades_without_api_key() {
    let (server, _dir) = test_server().await;

    server
        .post("/")
        .multipart(upload_form("ctx.txt", "text/plain", b"context text"))
        .await;

    let response = server
        .post("/ask_ai")
        .json(&serde_json::json!({ "question": "summarize" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["answer"], "AI is not configured.");
}

#[tokio::test]
async fn test_upload_page_renders_form() {
    let (server, _dir) = test_server().await;

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("multipart/form-data"));
}
