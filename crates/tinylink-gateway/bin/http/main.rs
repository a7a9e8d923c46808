mod cli;

use crate::cli::CLI;
use anyhow::Context;
use clap::Parser;
use tinylink_gateway::{App, AppState};
use tinylink_registry::open_registry;
use tinylink_telemetry::DEFAULT_FILTER;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;

    tinylink_telemetry::init(config.log_format, DEFAULT_FILTER)?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage.storage,
        "starting gateway server"
    );

    let registry = open_registry(&config.storage)
        .await
        .context("failed to open registry")?;
    let app = App::router(AppState::new(registry, config.base_url));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
