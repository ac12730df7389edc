//! HTTP server startup.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use super::shutdown::{shutdown_on, wait_for_signal};
use crate::error::AppError;
use crate::health::HealthState;

/// Binds `addr` and serves `app` until SIGTERM or SIGINT has been handled.
pub async fn start_server(
    app: Router,
    addr: SocketAddr,
    health: HealthState,
    drain: Duration,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Starting HTTP server");
    serve(listener, app, health, drain, wait_for_signal()).await
}

/// Serves `app` on `listener` until `trigger` resolves and the drain period
/// has passed.
pub(crate) async fn serve<F>(
    listener: TcpListener,
    app: Router,
    health: HealthState,
    drain: Duration,
    trigger: F,
) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(trigger, health, drain))
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    use crate::ads::{AdCatalog, AdSelector};
    use crate::routes::create_router;
    use crate::state::AppState;

    fn test_router(health: &HealthState) -> Router {
        let selector = AdSelector::new(AdCatalog::builtin(), 2).unwrap();
        create_router(AppState::new(selector, health.clone(), "adservice"))
    }

    async fn health_status_line(addr: SocketAddr) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response.lines().next().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_shutdown_trigger_clears_health_and_stops_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let health = HealthState::new();
        let (tx, rx) = oneshot::channel::<()>();

        let server = tokio::spawn(serve(
            listener,
            test_router(&health),
            health.clone(),
            Duration::ZERO,
            async move {
                let _ = rx.await;
            },
        ));

        assert!(health_status_line(addr).await.contains("200"));
        assert!(health.is_healthy());

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();

        assert!(!health.is_healthy());
    }

    #[tokio::test]
    async fn test_health_fails_during_drain() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let health = HealthState::new();
        let (tx, rx) = oneshot::channel::<()>();

        let server = tokio::spawn(serve(
            listener,
            test_router(&health),
            health.clone(),
            Duration::from_millis(500),
            async move {
                let _ = rx.await;
            },
        ));

        tx.send(()).unwrap();
        while health.is_healthy() {
            tokio::task::yield_now().await;
        }

        assert!(health_status_line(addr).await.contains("503"));
        server.await.unwrap().unwrap();
    }
}
