//! Download routes: list records and create new downloads.

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use tokio_util::io::ReaderStream;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{CreateDownloadRequest, DownloadResponse};
use crate::api::server::AppState;
use crate::database::models::NewDownload;
use crate::fetcher::DownloadPlan;

/// Create the downloads router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_downloads).post(create_download))
}

/// Derive a filesystem-safe name from a media title.
///
/// Whitespace becomes `_`; path separators are stripped.
fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| !matches!(c, '/' | '\\'))
        .collect();
    if cleaned.is_empty() {
        "video".to_string()
    } else {
        cleaned
    }
}

/// Select the download plan from the submitted clip range.
///
/// The range is applied only when both ends are present; a lone `start` or
/// `end` is ignored here (but still stored on the record as submitted).
fn plan_for(start: Option<i64>, end: Option<i64>) -> DownloadPlan {
    match (start, end) {
        (Some(start_secs), Some(end_secs)) => DownloadPlan::Clip {
            start_secs,
            end_secs,
        },
        _ => DownloadPlan::Full,
    }
}

#[utoipa::path(
    get,
    path = "/api/download",
    tag = "downloads",
    responses(
        (status = 200, description = "A list of download records", body = Vec<DownloadResponse>)
    )
)]
pub async fn list_downloads(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DownloadResponse>>> {
    let records = state.repository.list_all().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/download",
    tag = "downloads",
    request_body = CreateDownloadRequest,
    responses(
        (status = 200, description = "The downloaded file", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 400, description = "Missing or empty url", body = crate::api::error::ApiErrorResponse),
        (status = 500, description = "Error during video download", body = crate::api::error::ApiErrorResponse)
    )
)]
pub async fn create_download(
    State(state): State<AppState>,
    Json(request): Json<CreateDownloadRequest>,
) -> ApiResult<Response> {
    if request.url.trim().is_empty() {
        return Err(ApiError::bad_request("url is required"));
    }

    let probe = state.fetcher.probe(&request.url).await?;
    let name = sanitize_title(&probe.title);
    let filename = format!("{}.{}", name, probe.extension);
    let destination = state.download_dir.join(&filename);

    let plan = plan_for(request.start, request.end);
    state
        .fetcher
        .fetch(&request.url, &destination, &plan)
        .await?;

    let record = state
        .repository
        .insert(&NewDownload {
            name,
            url: request.url.clone(),
            start: request.start,
            end: request.end,
            file_path: destination.to_string_lossy().into_owned(),
        })
        .await?;

    info!(id = record.id, file = %record.file_path, "Download recorded");

    let file = tokio::fs::File::open(&destination)
        .await
        .map_err(crate::error::Error::from)?;
    let body = Body::from_stream(ReaderStream::new(file));

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, body).into_response())
}
