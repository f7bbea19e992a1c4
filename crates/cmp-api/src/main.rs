//! # cmp-api -- Binary Entry Point
//!
//! Starts the Axum HTTP server for the consent relay.
//! Binds to configurable port (default 80).

use std::net::SocketAddr;

use anyhow::Context;
use cmp_api::state::{AppConfig, AppState};
use cmp_client::CmpClient;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("invalid server configuration")?;
    let client = CmpClient::from_env().map_err(|e| {
        tracing::error!("Failed to create upstream client: {e}");
        e
    })?;
    tracing::info!(
        static_dir = %config.static_dir.display(),
        body_limit = config.body_limit,
        "relay configured"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = cmp_api::app(AppState::new(config, client));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("consent relay listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server shutdown with error")?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Structured tracing: `RUST_LOG` filter (default `info`), JSON lines when
/// `LOG_FORMAT=json`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
}
