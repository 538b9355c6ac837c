//! Video record routes: lookup and delete by id.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::models::{DownloadResponse, MessageResponse};
use crate::api::server::AppState;

/// Create the videos router.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(get_video).delete(delete_video))
}

#[utoipa::path(
    get,
    path = "/api/video/{id}",
    tag = "videos",
    params(
        ("id" = i64, Path, description = "The ID of the video")
    ),
    responses(
        (status = 200, description = "A video record", body = DownloadResponse),
        (status = 404, description = "Video not found", body = crate::api::error::ApiErrorResponse)
    )
)]
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DownloadResponse>> {
    let record = state.repository.get(id).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    delete,
    path = "/api/video/{id}",
    tag = "videos",
    params(
        ("id" = i64, Path, description = "The ID of the video to delete")
    ),
    responses(
        (status = 200, description = "Deletion confirmation", body = MessageResponse),
        (status = 404, description = "Video not found", body = crate::api::error::ApiErrorResponse)
    )
)]
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let record = state.repository.get(id).await?;

    // Remove the backing file; a file already gone is not an error.
    match tokio::fs::remove_file(&record.file_path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(crate::error::Error::from(e).into()),
    }

    state.repository.delete(id).await?;
    info!(id, "Video deleted");

    Ok(Json(MessageResponse {
        message: "Video deleted successfully".to_string(),
    }))
}
