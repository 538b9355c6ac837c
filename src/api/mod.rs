//! REST API server module.
//!
//! Provides HTTP endpoints for downloading videos and managing the
//! persisted download records.

pub mod error;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod server;

pub use server::{ApiServer, ApiServerConfig, AppState};
