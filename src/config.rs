//! Application configuration.
//!
//! All runtime settings live in an explicit [`AppConfig`] that is constructed
//! once in `main` and passed down to the server and repositories. Nothing in
//! the crate reads process-wide state after startup.

use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server bind address
    pub bind_address: String,
    /// Server port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Directory where downloaded files are stored
    pub download_dir: PathBuf,
    /// Path to the yt-dlp binary
    pub ytdlp_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            database_url: "sqlite:downloads.db?mode=rwc".to_string(),
            download_dir: PathBuf::from("downloads"),
            ytdlp_path: "yt-dlp".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Supported env vars:
    /// - `CLIPSERVE_BIND_ADDRESS` (e.g. "0.0.0.0")
    /// - `CLIPSERVE_PORT` (e.g. "8000")
    /// - `DATABASE_URL` (e.g. "sqlite:downloads.db?mode=rwc")
    /// - `CLIPSERVE_DOWNLOAD_DIR` (e.g. "downloads")
    /// - `YTDLP_PATH` (e.g. "/usr/local/bin/yt-dlp")
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(bind_address) = std::env::var("CLIPSERVE_BIND_ADDRESS")
            && !bind_address.trim().is_empty()
        {
            config.bind_address = bind_address;
        }

        if let Ok(port) = std::env::var("CLIPSERVE_PORT")
            && let Ok(parsed) = port.parse::<u16>()
        {
            config.port = parsed;
        }

        if let Ok(database_url) = std::env::var("DATABASE_URL")
            && !database_url.trim().is_empty()
        {
            config.database_url = database_url;
        }

        if let Ok(download_dir) = std::env::var("CLIPSERVE_DOWNLOAD_DIR")
            && !download_dir.trim().is_empty()
        {
            config.download_dir = PathBuf::from(download_dir);
        }

        if let Ok(ytdlp_path) = std::env::var("YTDLP_PATH")
            && !ytdlp_path.trim().is_empty()
        {
            config.ytdlp_path = ytdlp_path;
        }

        config
    }
}
