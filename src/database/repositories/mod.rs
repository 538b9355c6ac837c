//! Database repositories.

pub mod download;

pub use download::{DownloadRepository, SqlxDownloadRepository};
