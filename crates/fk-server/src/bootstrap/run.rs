use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use fk_core::config::AppConfig;

use super::wiring::wire_api;
use crate::routes::router;
use crate::state::ApiState;

const DEFAULT_BIND: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8787;

fn listen_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    let bind = if config.server_bind.is_empty() {
        DEFAULT_BIND
    } else {
        config.server_bind.as_str()
    };
    let port = if config.server_port == 0 {
        DEFAULT_PORT
    } else {
        config.server_port
    };
    format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("Invalid listen address {bind}:{port}"))
}

/// Wire the API and serve it until Ctrl-C or SIGTERM.
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let deps = wire_api(config)?;
    let app = router(ApiState::from_deps(&deps), &config.base_path);

    let addr = listen_addr(config)?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, base_path = %config.base_path, "Fit Kro API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
