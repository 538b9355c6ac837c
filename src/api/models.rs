//! API request and response models (DTOs).

use serde::{Deserialize, Serialize};

use crate::database::models::DownloadDbModel;

/// Request to download a video, optionally clipped to a sub-range.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateDownloadRequest {
    /// The video URL to download.
    pub url: String,
    /// Start time in seconds for clipping.
    pub start: Option<i64>,
    /// End time in seconds for clipping.
    pub end: Option<i64>,
}

/// A download record.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DownloadResponse {
    /// Record identifier
    pub id: i64,
    /// Derived media title
    pub name: String,
    /// Source URL as submitted
    pub url: String,
    /// Clip range start in seconds
    pub start: Option<i64>,
    /// Clip range end in seconds
    pub end: Option<i64>,
    /// Path of the stored file
    pub file_path: String,
}

impl From<DownloadDbModel> for DownloadResponse {
    fn from(model: DownloadDbModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            url: model.url,
            start: model.start,
            end: model.end,
            file_path: model.file_path,
        }
    }
}

/// Generic message response for operations that return only a status message.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    /// Status or result message
    pub message: String,
}
