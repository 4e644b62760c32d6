mod api;
mod config;
mod csv;
mod error;
mod github;
mod http;
mod logger;
mod page;

use anyhow::{Context, Result};
use api::AppState;
use config::Config;
use github::GithubClient;
use page::PageRenderer;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().await.context("Cannot load config file")?;
    logger::init(config.log_level)?;

    log::info!("Starting");
    let github = GithubClient::new(&config.github).context("Cannot create the github client")?;
    let pages = PageRenderer::new().context("Cannot compile the page templates")?;

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Cannot bind to {}", config.bind_address))?;
    log::info!("Listening on {}", config.bind_address);

    let state = AppState {
        config: Arc::new(config),
        github,
        pages: Arc::new(pages),
    };

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server stopped unexpectedly")?;

    log::info!("Stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("Cannot install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                log::error!("Cannot install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received Ctrl+C, shutting down"),
        _ = terminate => log::info!("Received SIGTERM, shutting down"),
    }
}
