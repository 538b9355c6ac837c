//! OpenAPI documentation configuration.
//!
//! Configures OpenAPI specification generation using `utoipa`. The document
//! is served at `/apispec.json` and Swagger UI at `/docs`.

use utoipa::OpenApi;

use crate::api::error::ApiErrorResponse;
use crate::api::models::{CreateDownloadRequest, DownloadResponse, MessageResponse};
use crate::api::routes::health::HealthResponse;

/// OpenAPI documentation for the clipserve API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "clipserve API",
        version = "0.1.0",
        description = "API to download full or clipped videos",
        license(name = "MIT OR Apache-2.0")
    ),
    tags(
        (name = "downloads", description = "Download records and video retrieval"),
        (name = "videos", description = "Single record lookup and deletion"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::api::routes::downloads::list_downloads,
        crate::api::routes::downloads::create_download,
        crate::api::routes::videos::get_video,
        crate::api::routes::videos::delete_video,
        crate::api::routes::health::health_check,
    ),
    components(
        schemas(
            CreateDownloadRequest,
            DownloadResponse,
            MessageResponse,
            HealthResponse,
            ApiErrorResponse,
        )
    )
)]
pub struct ApiDoc;
