//! HTTP routes and handlers.

use crate::upload::{UploadError, UploadStore};
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tally_core::{reports, EntryError, EntryService};
use tally_store::{Record, Value};

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Entry service for record operations.
    pub service: Arc<EntryService>,
    /// Upload persistence.
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Creates the handler state.
    pub fn new(service: Arc<EntryService>, uploads: Arc<UploadStore>) -> Self {
        Self { service, uploads }
    }
}

/// Builds the application router.
///
/// `max_upload_bytes` bounds the request body for the upload route; the
/// JSON routes keep axum's default limit.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/data", post(save_data).get(get_data))
        .route("/reports/summary", get(report_summary))
        .route("/reports/generate", get(report_generate))
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/files/:filename", get(get_file))
        .with_state(state)
}

#[derive(Deserialize)]
struct SaveRequest {
    name: Option<String>,
    value: Option<Value>,
}

#[derive(Serialize)]
struct SaveResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<Record>,
}

#[derive(Serialize)]
struct ListResponse {
    success: bool,
    message: String,
    data: Vec<Record>,
}

#[derive(Serialize)]
struct ReportResponse {
    report: String,
}

#[derive(Serialize)]
struct UploadResponse {
    message: String,
    path: String,
}

// --- POST /data ---

async fn save_data(State(state): State<AppState>, Json(req): Json<SaveRequest>) -> Response {
    let name = req.name.unwrap_or_default();
    let value = req
        .value
        .unwrap_or(Value::Other(serde_json::Value::Null));

    match state.service.save_data(&name, value) {
        Ok(record) => (
            StatusCode::CREATED,
            Json(SaveResponse {
                success: true,
                message: "Data saved successfully".into(),
                record: Some(record),
            }),
        )
            .into_response(),
        Err(err) => {
            let (status, message) = match &err {
                EntryError::MissingField => (StatusCode::BAD_REQUEST, err.to_string()),
                EntryError::Duplicate => (StatusCode::CONFLICT, err.to_string()),
                EntryError::Store(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Server error: {err}"),
                ),
            };
            (
                status,
                Json(SaveResponse {
                    success: false,
                    message,
                    record: None,
                }),
            )
                .into_response()
        }
    }
}

// --- GET /data ---

async fn get_data(State(state): State<AppState>) -> Response {
    let data = state.service.get_data();
    (
        StatusCode::OK,
        Json(ListResponse {
            success: true,
            message: "Data retrieved successfully".into(),
            data,
        }),
    )
        .into_response()
}

// --- GET /reports/summary ---

async fn report_summary(State(state): State<AppState>) -> Response {
    let summary = reports::summarize(&state.service.get_data());
    (StatusCode::OK, Json(summary)).into_response()
}

// --- GET /reports/generate ---

async fn report_generate(State(state): State<AppState>) -> Response {
    let report = reports::generate_report(&state.service.get_data());
    (StatusCode::OK, Json(ReportResponse { report })).into_response()
}

// --- POST /upload ---

async fn upload_file(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                return (StatusCode::BAD_REQUEST, format!("Invalid upload: {err}"))
                    .into_response()
            }
        };

        // The upload is the first field that carries a filename.
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let declared_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                return (StatusCode::BAD_REQUEST, format!("Invalid upload: {err}"))
                    .into_response()
            }
        };

        return match state
            .uploads
            .store(&declared_type, &original_name, &bytes)
            .await
        {
            Ok(stored) => (
                StatusCode::OK,
                Json(UploadResponse {
                    message: "File uploaded successfully".into(),
                    path: stored.path.display().to_string(),
                }),
            )
                .into_response(),
            Err(err @ UploadError::UnsupportedType { .. }) => {
                tracing::warn!(
                    declared_type = %declared_type,
                    filename = %original_name,
                    "upload rejected"
                );
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            Err(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Server error: {err}"))
                    .into_response()
            }
        };
    }

    (StatusCode::BAD_REQUEST, "No file uploaded.").into_response()
}

// --- GET /files/:filename ---

async fn get_file(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    let Some(path) = state.uploads.find(&filename).await else {
        return (StatusCode::NOT_FOUND, "File not found.").into_response();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            bytes,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "File not found.").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tally_store::{MemoryStore, RecordStore};
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    struct TestApp {
        router: Router,
        _uploads_dir: TempDir,
    }

    fn test_app() -> TestApp {
        let uploads_dir = TempDir::new().unwrap();
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let state = AppState::new(
            Arc::new(EntryService::new(store)),
            Arc::new(UploadStore::open(uploads_dir.path()).unwrap()),
        );
        TestApp {
            router: router(state, 1024 * 1024),
            _uploads_dir: uploads_dir,
        }
    }

    async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes)
            .unwrap_or(serde_json::Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ));
        (status, json)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn multipart_upload(filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let boundary = "tally-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn save_data_created() {
        let app = test_app();
        let (status, body) =
            send(&app, post_json("/data", r#"{"name":"rent","value":1200}"#)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], serde_json::json!(true));
        assert_eq!(body["message"], serde_json::json!("Data saved successfully"));
        assert_eq!(body["record"]["name"], serde_json::json!("rent"));
        assert_eq!(body["record"]["value"], serde_json::json!(1200.0));
        assert!(body["record"]["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn save_data_missing_fields() {
        let app = test_app();

        for body in [r#"{"value":1}"#, r#"{"name":"x"}"#, r#"{"name":"","value":1}"#] {
            let (status, response) = send(&app, post_json("/data", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                response["message"],
                serde_json::json!("Name and value are required fields")
            );
            assert_eq!(response["success"], serde_json::json!(false));
        }
    }

    #[tokio::test]
    async fn save_data_duplicate_conflict() {
        let app = test_app();
        send(&app, post_json("/data", r#"{"name":"rent","value":1}"#)).await;

        let (status, body) =
            send(&app, post_json("/data", r#"{"name":"rent","value":2}"#)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["message"],
            serde_json::json!("Duplicate data found - item with this name already exists")
        );
    }

    #[tokio::test]
    async fn get_data_lists_records() {
        let app = test_app();
        send(&app, post_json("/data", r#"{"name":"a","value":1}"#)).await;
        send(&app, post_json("/data", r#"{"name":"b","value":"two"}"#)).await;

        let (status, body) = send(&app, get("/data")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            serde_json::json!("Data retrieved successfully")
        );
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn summary_aggregates() {
        let app = test_app();
        send(&app, post_json("/data", r#"{"name":"a","value":100}"#)).await;
        send(&app, post_json("/data", r#"{"name":"b","value":200}"#)).await;
        send(&app, post_json("/data", r#"{"name":"c","value":"invalid"}"#)).await;

        let (status, body) = send(&app, get("/reports/summary")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], serde_json::json!(300.0));
        assert_eq!(body["count"], serde_json::json!(3));
        assert_eq!(body["average"], serde_json::json!(100.0));
    }

    #[tokio::test]
    async fn generate_report_text() {
        let app = test_app();
        send(&app, post_json("/data", r#"{"name":"a","value":100}"#)).await;
        send(&app, post_json("/data", r#"{"name":"b","value":200}"#)).await;

        let (status, body) = send(&app, get("/reports/generate")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["report"],
            serde_json::json!("Total entries: 2, Total value: 300, Average: 150")
        );
    }

    #[tokio::test]
    async fn upload_round_trip() {
        let app = test_app();
        let (status, body) =
            send(&app, multipart_upload("pic.png", "image/png", b"PNGDATA")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            serde_json::json!("File uploaded successfully")
        );

        let path = body["path"].as_str().unwrap();
        let filename = std::path::Path::new(path)
            .file_name()
            .unwrap()
            .to_str()
            .unwrap();

        let response = app
            .router
            .clone()
            .oneshot(get(&format!("/files/{filename}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"PNGDATA");
    }

    #[tokio::test]
    async fn upload_rejects_unsupported_type() {
        let app = test_app();
        let (status, body) =
            send(&app, multipart_upload("notes.txt", "text/plain", b"hello")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!("File type not supported"));
    }

    #[tokio::test]
    async fn upload_without_file_rejected() {
        let app = test_app();
        let boundary = "tally-test-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\njust text\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!("No file uploaded."));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let app = test_app();
        let response = app
            .router
            .clone()
            .oneshot(get("/files/12345-000000000.png"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
