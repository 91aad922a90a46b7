//! metricbuf server
//!
//! - POST /metrics : append one JSON record to the in-memory buffer
//! - GET  /metrics : the buffered records, oldest first
//! - Ops endpoints, CORS for any origin, graceful shutdown on SIGINT/SIGTERM
//!
//! Usage: `metricbuf-server [config.yaml]`

use tracing_subscriber::{fmt, EnvFilter};

use metricbuf_core::error::{MetricBufError, Result};
use metricbuf_server::{app_state::AppState, config, router, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let path = std::env::args().nth(1);
    let cfg = config::load(path.as_deref())?;
    let listen = cfg.server.listen_addr()?;
    let capacity = cfg.buffer.capacity;

    let state = AppState::new(cfg);
    let app = router::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MetricBufError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, capacity, "metricbuf starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::drain_on(shutdown::os_signal(), state))
        .await
        .map_err(|e| MetricBufError::Internal(format!("server failed: {e}")))?;

    tracing::info!("metricbuf stopped");
    Ok(())
}
