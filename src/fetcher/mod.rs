//! Media fetcher boundary.
//!
//! The actual media retrieval is delegated to an external extraction tool.
//! This module defines the trait contract the request handlers program
//! against, plus the error type fetch failures surface as. The production
//! implementation shells out to yt-dlp (see [`ytdlp`]).

pub mod ytdlp;

pub use ytdlp::YtDlpFetcher;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Basic metadata reported by a probe, without downloading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaProbe {
    /// Media title as reported by the source.
    pub title: String,
    /// Container extension (e.g. "mp4").
    pub extension: String,
}

/// What to retrieve: the whole media, or a sub-interval of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPlan {
    /// Retrieve the full media.
    Full,
    /// Retrieve only the given sub-interval, in seconds from the start.
    Clip { start_secs: i64, end_secs: i64 },
}

/// Errors surfaced by a media fetcher.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{context} failed: {detail}")]
    CommandFailed {
        context: &'static str,
        detail: String,
    },

    #[error("failed to parse media metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// External collaborator performing URL resolution and media retrieval.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Inspect a URL without downloading.
    async fn probe(&self, url: &str) -> Result<MediaProbe, FetchError>;

    /// Retrieve best-available audio+video, muxed, to `destination`.
    ///
    /// A `Clip` plan restricts retrieval to that sub-interval. Any failure
    /// (network, unsupported source, decoding) is reported as an error;
    /// a partially written destination file is not cleaned up.
    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        plan: &DownloadPlan,
    ) -> Result<(), FetchError>;
}
