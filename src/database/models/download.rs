//! Download record model.

use sqlx::FromRow;

/// A persisted download record.
///
/// Created only after a successful fetch; never updated. `start` and `end`
/// hold the clip range as submitted by the caller, even when only one of the
/// two was provided (the range is applied to the fetch only when both are
/// present).
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DownloadDbModel {
    /// Unique identifier, assigned on insert.
    pub id: i64,
    /// Derived media title, whitespace sanitized.
    pub name: String,
    /// Source URL as submitted.
    pub url: String,
    /// Clip range start in seconds.
    pub start: Option<i64>,
    /// Clip range end in seconds.
    pub end: Option<i64>,
    /// Path of the stored file.
    pub file_path: String,
}

/// Field set for inserting a new download record.
#[derive(Debug, Clone)]
pub struct NewDownload {
    pub name: String,
    pub url: String,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub file_path: String,
}
