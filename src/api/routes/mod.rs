//! API route modules.
//!
//! Organizes routes by resource type.

pub mod downloads;
pub mod health;
pub mod videos;

use axum::{Router, response::Html, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::openapi::ApiDoc;
use crate::api::server::AppState;

/// Create the main API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .nest("/api/download", downloads::router())
        .nest("/api/video", videos::router())
        .nest("/api/health", health::router())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/apispec.json", ApiDoc::openapi()))
}

/// Serve the static landing page.
async fn landing_page() -> Html<&'static str> {
    Html(include_str!("../../../static/index.html"))
}
