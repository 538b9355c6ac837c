//! Database models.

pub mod download;

pub use download::{DownloadDbModel, NewDownload};
