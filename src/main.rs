use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clipserve::api::{ApiServer, ApiServerConfig, AppState};
use clipserve::config::AppConfig;
use clipserve::database;
use clipserve::database::repositories::SqlxDownloadRepository;
use clipserve::fetcher::YtDlpFetcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clipserve=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env_or_default();

    // Ensure the download directory exists
    tokio::fs::create_dir_all(&config.download_dir).await?;

    // Initialize database
    let pool = database::init_pool(&config.database_url).await?;
    database::run_migrations(&pool).await?;

    let repository = Arc::new(SqlxDownloadRepository::new(pool));
    let fetcher = Arc::new(YtDlpFetcher::new(config.ytdlp_path.clone()));
    let state = AppState::new(repository, fetcher, config.download_dir.clone());

    let server = ApiServer::new(ApiServerConfig::from(&config), state);

    // Cancel the server on Ctrl-C for a graceful shutdown
    let cancel_token = server.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_token.cancel();
        }
    });

    server.run().await?;

    Ok(())
}
