use std::{future::Future, net::SocketAddr};

use configs::{AppConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::auth::ServerState;
use crate::errors::StartupError;
use crate::routes;

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {e}", server.host, server.port)))
}

/// Resolves on Ctrl+C; the server then drains in-flight requests.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C; shutting down");
        return;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: load configuration and serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    run_with_config(cfg, shutdown_signal()).await
}

/// Connect the store, serve the router, then release the store once the
/// listener has drained.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = bind_addr(&cfg.server)?;
    let store = models::db::connect(&cfg.database).await?;
    let state = ServerState::from_store(&store, &cfg);
    let app = routes::build_router(state, build_cors());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Car doctor is running");
    let served = axum::serve(listener, app).with_graceful_shutdown(shutdown).await;

    store.shutdown().await;
    served?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let cfg = ServerConfig { host: "127.0.0.1".into(), port: 5000, worker_threads: None };
        assert_eq!(bind_addr(&cfg).unwrap().port(), 5000);
        let bad = ServerConfig { host: "not a host".into(), port: 5000, worker_threads: None };
        assert!(matches!(bind_addr(&bad), Err(StartupError::InvalidConfig(_))));
    }
}
