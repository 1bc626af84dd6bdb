mod config;
mod routes;
mod services;
mod state;

use tracing::{info, warn};

use crate::services::assets::SiteAssets;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // A missing .env is normal outside local development.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env()?;
    let assets = SiteAssets::scan(&config.site_dir).unwrap_or_else(|e| {
        warn!(site_dir = %config.site_dir.display(), error = %e, "site dir unreadable; serving no scripts");
        SiteAssets::empty(&config.site_dir)
    });
    info!(site_dir = %config.site_dir.display(), scripts = assets.file_count(), "site assets loaded");

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let public_url = config.public_url.clone();
    let state = state::AppState::new(config, assets);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;

    info!(%addr, %public_url, "coordshare listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    info!("coordshare stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
}
