//! yt-dlp based media fetcher.
//!
//! Probing uses `--dump-single-json --skip-download` and parses the metadata
//! from stdout. Downloads select `bestvideo+bestaudio/best`; clip ranges are
//! forwarded with `--download-sections`, cutting at keyframes.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::{DownloadPlan, FetchError, MediaFetcher, MediaProbe};

/// Title used when the source reports none.
const DEFAULT_TITLE: &str = "downloaded_video";

/// Container extension used when the source reports none.
const DEFAULT_EXTENSION: &str = "mp4";

/// Subset of the yt-dlp metadata dump we care about.
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    title: Option<String>,
    ext: Option<String>,
}

/// Media fetcher shelling out to the yt-dlp binary.
pub struct YtDlpFetcher {
    binary: String,
}

impl YtDlpFetcher {
    /// Create a fetcher using the given yt-dlp binary path.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn probe_args(url: &str) -> Vec<String> {
        vec![
            "--dump-single-json".to_string(),
            "--skip-download".to_string(),
            "--no-warnings".to_string(),
            "--no-playlist".to_string(),
            url.to_string(),
        ]
    }

    fn fetch_args(url: &str, destination: &Path, plan: &DownloadPlan) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            "bestvideo+bestaudio/best".to_string(),
            "-o".to_string(),
            destination.to_string_lossy().into_owned(),
            "--no-playlist".to_string(),
            "--no-progress".to_string(),
            "--no-warnings".to_string(),
        ];

        if let DownloadPlan::Clip {
            start_secs,
            end_secs,
        } = plan
        {
            // yt-dlp section syntax: "*<start>-<end>" in seconds.
            args.extend([
                "--download-sections".to_string(),
                format!("*{start_secs}-{end_secs}"),
                "--force-keyframes-at-cuts".to_string(),
            ]);
        }

        args.push(url.to_string());
        args
    }

    /// Run yt-dlp with the given args and capture its output.
    async fn run(&self, args: &[String]) -> Result<std::process::Output, FetchError> {
        debug!("Running {} {}", self.binary, args.join(" "));
        tokio::process::Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| FetchError::Spawn {
                binary: self.binary.clone(),
                source,
            })
    }
}

/// Extract the most useful part of a failed command's stderr.
fn stderr_detail(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("no error output")
        .trim()
        .to_string();
    format!("{} (exit status {})", detail, output.status)
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn probe(&self, url: &str) -> Result<MediaProbe, FetchError> {
        let output = self.run(&Self::probe_args(url)).await?;
        if !output.status.success() {
            return Err(FetchError::CommandFailed {
                context: "probe",
                detail: stderr_detail(&output),
            });
        }

        let parsed: ProbeOutput = serde_json::from_slice(&output.stdout)?;
        Ok(MediaProbe {
            title: parsed.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            extension: parsed.ext.unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        })
    }

    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        plan: &DownloadPlan,
    ) -> Result<(), FetchError> {
        match plan {
            DownloadPlan::Clip {
                start_secs,
                end_secs,
            } => info!("Downloading clip from {start_secs} sec to {end_secs} sec..."),
            DownloadPlan::Full => info!("Downloading full video..."),
        }

        let output = self.run(&Self::fetch_args(url, destination, plan)).await?;
        if !output.status.success() {
            return Err(FetchError::CommandFailed {
                context: "download",
                detail: stderr_detail(&output),
            });
        }
        Ok(())
    }
}
