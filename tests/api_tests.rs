//! API tests for the clipserve HTTP surface.
//!
//! These drive the full router with an in-test media fetcher, so every
//! request exercises the real handlers, repository, and SQLite schema.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use clipserve::api::AppState;
use clipserve::api::routes::create_router;
use clipserve::database::repositories::{DownloadRepository, SqlxDownloadRepository};
use clipserve::database::{init_pool_with_size, run_migrations};
use clipserve::fetcher::{DownloadPlan, FetchError, MediaFetcher, MediaProbe};

const PAYLOAD: &[u8] = b"fake video bytes";

#[derive(Default)]
struct FetchLog {
    probes: Vec<String>,
    fetches: Vec<(String, PathBuf, DownloadPlan)>,
}

/// Scripted media fetcher: reports a fixed probe result and writes a fixed
/// payload to the destination, or fails without touching the filesystem.
struct StubFetcher {
    title: String,
    extension: String,
    fail_fetch: bool,
    log: Mutex<FetchLog>,
}

impl StubFetcher {
    fn new(fail_fetch: bool) -> Arc<Self> {
        Arc::new(Self {
            title: "Sample Video".to_string(),
            extension: "mp4".to_string(),
            fail_fetch,
            log: Mutex::new(FetchLog::default()),
        })
    }

    fn ok() -> Arc<Self> {
        Self::new(false)
    }

    fn failing() -> Arc<Self> {
        Self::new(true)
    }

    fn probe_count(&self) -> usize {
        self.log.lock().unwrap().probes.len()
    }

    fn last_fetch(&self) -> Option<(String, PathBuf, DownloadPlan)> {
        self.log.lock().unwrap().fetches.last().cloned()
    }
}

#[async_trait]
impl MediaFetcher for StubFetcher {
    async fn probe(&self, url: &str) -> Result<MediaProbe, FetchError> {
        self.log.lock().unwrap().probes.push(url.to_string());
        Ok(MediaProbe {
            title: self.title.clone(),
            extension: self.extension.clone(),
        })
    }

    async fn fetch(
        &self,
        url: &str,
        destination: &std::path::Path,
        plan: &DownloadPlan,
    ) -> Result<(), FetchError> {
        if self.fail_fetch {
            return Err(FetchError::CommandFailed {
                context: "download",
                detail: "Unsupported URL".to_string(),
            });
        }
        tokio::fs::write(destination, PAYLOAD)
            .await
            .map_err(|source| FetchError::Spawn {
                binary: "stub".to_string(),
                source,
            })?;
        self.log
            .lock()
            .unwrap()
            .fetches
            .push((url.to_string(), destination.to_path_buf(), *plan));
        Ok(())
    }
}

struct TestApp {
    app: Router,
    repository: Arc<SqlxDownloadRepository>,
    // Held so the download directory outlives the test
    _download_dir: tempfile::TempDir,
    download_path: PathBuf,
}

async fn setup(fetcher: Arc<StubFetcher>) -> TestApp {
    let pool = init_pool_with_size("sqlite::memory:", 1)
        .await
        .expect("Failed to create test pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let repository = Arc::new(SqlxDownloadRepository::new(pool));
    let download_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let download_path = download_dir.path().to_path_buf();

    let state = AppState::new(repository.clone(), fetcher, download_path.clone());

    TestApp {
        app: create_router(state),
        repository,
        _download_dir: download_dir,
        download_path,
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_create_returns_attachment_and_records() {
    let fetcher = StubFetcher::ok();
    let test = setup(fetcher.clone()).await;

    let response = test
        .app
        .clone()
        .oneshot(post_json(
            "/api/download",
            serde_json::json!({"url": "https://example.com/video1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"Sample_Video.mp4\""
    );
    assert_eq!(body_bytes(response).await, PAYLOAD);

    let records = test.repository.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Sample_Video");
    assert_eq!(records[0].url, "https://example.com/video1");
    assert_eq!(records[0].start, None);
    assert_eq!(records[0].end, None);
    assert!(records[0].file_path.ends_with("Sample_Video.mp4"));
    assert!(test.download_path.join("Sample_Video.mp4").exists());
}

#[tokio::test]
async fn test_create_with_range_requests_clip() {
    let fetcher = StubFetcher::ok();
    let test = setup(fetcher.clone()).await;

    let response = test
        .app
        .clone()
        .oneshot(post_json(
            "/api/download",
            serde_json::json!({"url": "https://example.com/video1", "start": 10, "end": 20}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let (_, _, plan) = fetcher.last_fetch().expect("fetch was invoked");
    assert_eq!(
        plan,
        DownloadPlan::Clip {
            start_secs: 10,
            end_secs: 20
        }
    );

    let records = test.repository.list_all().await.unwrap();
    assert_eq!(records[0].start, Some(10));
    assert_eq!(records[0].end, Some(20));
}

#[tokio::test]
async fn test_create_with_lone_start_downloads_full() {
    let fetcher = StubFetcher::ok();
    let test = setup(fetcher.clone()).await;

    let response = test
        .app
        .clone()
        .oneshot(post_json(
            "/api/download",
            serde_json::json!({"url": "https://example.com/video1", "start": 10}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let (_, _, plan) = fetcher.last_fetch().expect("fetch was invoked");
    assert_eq!(plan, DownloadPlan::Full);

    // The lone value is still stored as submitted.
    let records = test.repository.list_all().await.unwrap();
    assert_eq!(records[0].start, Some(10));
    assert_eq!(records[0].end, None);
}

#[tokio::test]
async fn test_create_empty_url_rejected_before_fetch() {
    let fetcher = StubFetcher::ok();
    let test = setup(fetcher.clone()).await;

    let response = test
        .app
        .clone()
        .oneshot(post_json("/api/download", serde_json::json!({"url": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fetcher.probe_count(), 0);
    assert!(test.repository.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_fetch_failure_returns_error() {
    let fetcher = StubFetcher::failing();
    let test = setup(fetcher).await;

    let response = test
        .app
        .clone()
        .oneshot(post_json(
            "/api/download",
            serde_json::json!({"url": "https://example.com/broken"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(
        body["error"].as_str().unwrap().contains("Unsupported URL"),
        "unexpected error body: {body}"
    );
    assert!(test.repository.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_returns_created_records() {
    let fetcher = StubFetcher::ok();
    let test = setup(fetcher).await;

    for url in ["https://example.com/a", "https://example.com/b"] {
        let response = test
            .app
            .clone()
            .oneshot(post_json("/api/download", serde_json::json!({"url": url})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = test.app.clone().oneshot(get("/api/download")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let items = body.as_array().expect("list response is an array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Sample_Video");
}

#[tokio::test]
async fn test_get_unknown_video_returns_not_found() {
    let test = setup(StubFetcher::ok()).await;

    let response = test.app.clone().oneshot(get("/api/video/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Video not found.");
}

#[tokio::test]
async fn test_delete_removes_record_and_file() {
    let fetcher = StubFetcher::ok();
    let test = setup(fetcher).await;

    let response = test
        .app
        .clone()
        .oneshot(post_json(
            "/api/download",
            serde_json::json!({"url": "https://example.com/video1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let id = test.repository.list_all().await.unwrap()[0].id;
    let file = test.download_path.join("Sample_Video.mp4");
    assert!(file.exists());

    let response = test
        .app
        .clone()
        .oneshot(delete(&format!("/api/video/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Video deleted successfully");
    assert!(!file.exists());

    let response = test
        .app
        .clone()
        .oneshot(get(&format!("/api/video/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_tolerates_already_missing_file() {
    let fetcher = StubFetcher::ok();
    let test = setup(fetcher).await;

    let response = test
        .app
        .clone()
        .oneshot(post_json(
            "/api/download",
            serde_json::json!({"url": "https://example.com/video1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let id = test.repository.list_all().await.unwrap()[0].id;
    tokio::fs::remove_file(test.download_path.join("Sample_Video.mp4"))
        .await
        .unwrap();

    let response = test
        .app
        .clone()
        .oneshot(delete(&format!("/api/video/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(test.repository.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_unknown_video_returns_not_found() {
    let test = setup(StubFetcher::ok()).await;

    let response = test
        .app
        .clone()
        .oneshot(delete("/api/video/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_landing_page_and_api_description_served() {
    let test = setup(StubFetcher::ok()).await;

    let response = test.app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("/api/download"));

    let response = test.app.clone().oneshot(get("/apispec.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"].get("/api/download").is_some());
}
