//! Graceful shutdown.
//!
//! On SIGINT/SIGTERM the state is marked draining first, so `/readyz` answers
//! 503 while the listener is still open. Only after `server.drain_grace_ms`
//! does the returned future resolve and axum stop accepting connections;
//! in-flight requests then run to completion.

use std::future::Future;
use std::time::Duration;

use tokio::signal;

use crate::app_state::AppState;

/// Resolves on SIGINT or SIGTERM.
pub async fn os_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT"),
        _ = terminate => tracing::info!("received SIGTERM"),
    }
}

/// Waits for `trigger`, flips readiness to draining, then holds the listener
/// open for the configured grace period.
pub async fn drain_on<F>(trigger: F, state: AppState)
where
    F: Future<Output = ()>,
{
    trigger.await;
    state.set_draining();

    let grace = Duration::from_millis(state.cfg().server.drain_grace_ms);
    tracing::info!(grace_ms = grace.as_millis() as u64, "draining");
    tokio::time::sleep(grace).await;
}
