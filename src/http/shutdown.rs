//! Graceful shutdown and signal handling.

use std::future::Future;
use std::time::Duration;

use crate::health::HealthState;

/// Resolves once SIGTERM or SIGINT is received.
pub(crate) async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Shutdown future for `axum::serve(..).with_graceful_shutdown(..)`.
///
/// When `trigger` resolves the service is marked unhealthy, so probes return
/// 503 while it keeps serving for `drain`; after that the server stops
/// accepting connections and waits for in-flight requests.
pub(crate) async fn shutdown_on<F>(trigger: F, health: HealthState, drain: Duration)
where
    F: Future<Output = ()>,
{
    trigger.await;
    drain_then_stop(&health, drain).await;
}

async fn drain_then_stop(health: &HealthState, drain: Duration) {
    health.set_healthy(false);
    if !drain.is_zero() {
        tracing::info!(
            drain_secs = drain.as_secs(),
            "Marked unhealthy, draining before shutdown"
        );
        tokio::time::sleep(drain).await;
    }
    tracing::info!("Stopping HTTP server");
}
