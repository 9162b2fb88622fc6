//! End-to-end tests for the ingestion router: multipart uploads, strict
//! JSON notifications, and attachment downloads, all rendered through the
//! JSON envelope.

use axum_test::TestServer;
use intake_core::IngestConfig;
use intake_http::ResponseEnvelope;
use tempfile::TempDir;

const BOUNDARY: &str = "IntakeRouterBoundary99";

fn server_with(config: IngestConfig) -> (TestServer, TempDir) {
    let dir = TempDir::new().unwrap();
    let app = intake_http::router(config, dir.path().to_path_buf());
    (TestServer::new(app).unwrap(), dir)
}

fn png_multipart(filename: &str) -> Vec<u8> {
    let png: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(png);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

#[tokio::test]
async fn upload_then_download_roundtrip() {
    let (server, dir) = server_with(IngestConfig::new().with_allowed_types(["image/png"]));

    let response = server
        .post("/upload")
        .content_type(&multipart_content_type())
        .bytes(png_multipart("photo.png").into())
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let envelope: ResponseEnvelope = response.json();
    assert!(!envelope.error);
    let records = envelope.data.unwrap();
    let stored_name = records[0]["stored_name"].as_str().unwrap().to_string();
    assert!(stored_name.ends_with(".png"));
    assert_eq!(records[0]["original_name"], "photo.png");
    assert!(dir.path().join(&stored_name).is_file());

    let download = server.get(&format!("/download/{stored_name}")).await;
    download.assert_status_ok();
    assert_eq!(
        download.header("content-disposition").to_str().unwrap(),
        format!("attachment; filename=\"{stored_name}\"")
    );
}

#[tokio::test]
async fn upload_of_disallowed_type_yields_error_envelope() {
    let (server, _dir) = server_with(IngestConfig::new().with_allowed_types(["image/jpeg"]));

    let response = server
        .post("/upload")
        .content_type(&multipart_content_type())
        .bytes(png_multipart("photo.png").into())
        .await;
    response.assert_status(axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let envelope: ResponseEnvelope = response.json();
    assert!(envelope.error);
    assert_eq!(
        envelope.message,
        "the uploaded file type image/png is not permitted"
    );
    assert!(envelope.data.is_none());
}

#[tokio::test]
async fn upload_one_without_file_part() {
    let (server, _dir) = server_with(IngestConfig::new());

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"comment\"\r\n\r\njust text\r\n--{BOUNDARY}--\r\n"
    );
    let response = server
        .post("/upload-one")
        .content_type(&multipart_content_type())
        .bytes(body.into_bytes().into())
        .await;
    response.assert_status_bad_request();

    let envelope: ResponseEnvelope = response.json();
    assert!(envelope.error);
    assert_eq!(envelope.message, "no file was provided");
}

#[tokio::test]
async fn notification_accepted() {
    let (server, _dir) = server_with(IngestConfig::new());

    let response = server
        .post("/notify")
        .json(&serde_json::json!({"event": "upload.finished", "detail": "42 files"}))
        .await;
    response.assert_status(axum::http::StatusCode::ACCEPTED);

    let envelope: ResponseEnvelope = response.json();
    assert!(!envelope.error);
    assert_eq!(envelope.message, "notification accepted");
}

#[tokio::test]
async fn notification_with_unknown_key_rejected() {
    let (server, _dir) = server_with(IngestConfig::new());

    let response = server
        .post("/notify")
        .json(&serde_json::json!({"event": "x", "extra": true}))
        .await;
    response.assert_status_bad_request();

    let envelope: ResponseEnvelope = response.json();
    assert!(envelope.error);
    assert_eq!(envelope.message, "body contains unknown key \"extra\"");
}

#[tokio::test]
async fn notification_with_unknown_key_allowed_when_configured() {
    let (server, _dir) = server_with(IngestConfig::new().with_allow_unknown_fields(true));

    let response = server
        .post("/notify")
        .json(&serde_json::json!({"event": "x", "extra": true}))
        .await;
    response.assert_status(axum::http::StatusCode::ACCEPTED);
}

#[tokio::test]
async fn notification_with_wrong_field_type() {
    let (server, _dir) = server_with(IngestConfig::new());

    let response = server
        .post("/notify")
        .json(&serde_json::json!({"event": 7}))
        .await;
    response.assert_status_bad_request();

    let envelope: ResponseEnvelope = response.json();
    assert_eq!(
        envelope.message,
        "body contains incorrect JSON type for field \"event\""
    );
}

#[tokio::test]
async fn empty_notification_body() {
    let (server, _dir) = server_with(IngestConfig::new());

    let response = server
        .post("/notify")
        .content_type("application/json")
        .bytes(Vec::new().into())
        .await;
    response.assert_status_bad_request();

    let envelope: ResponseEnvelope = response.json();
    assert_eq!(envelope.message, "body must not be empty");
}

#[tokio::test]
async fn oversized_notification_body() {
    let (server, _dir) = server_with(IngestConfig::new().with_max_json_bytes(16));

    let response = server
        .post("/notify")
        .json(&serde_json::json!({"event": "a very long event name indeed"}))
        .await;
    response.assert_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE);

    let envelope: ResponseEnvelope = response.json();
    assert_eq!(envelope.message, "body must not be larger than 16 bytes");
}
