//! Binary entrypoint: bind the listener and serve the relay until terminated.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use volley::{router, AppState, RelayConfig, ReqwestHttpClient, ScriptFetcher};

/// Initialize structured logging to stderr.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,volley=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = RelayConfig::from_env();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let http_client = Arc::new(ReqwestHttpClient::new());
    let fetcher = Arc::new(ScriptFetcher::new(http_client, config.clone()));
    let app = router(AppState { fetcher });

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %addr,
        upstream = %config.upstream_base_url,
        "Script relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve when the process receives Ctrl-C / SIGINT.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install shutdown signal handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
