//! HTTP serving of the rendered dashboard page.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use insights_core::error::{InsightsError, Result};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Router serving `page` at `/`; every other path is a 404.
pub fn build_router(page: Arc<str>) -> Router {
    Router::new()
        .route("/", get(index))
        .fallback(not_found)
        .with_state(page)
}

async fn index(State(page): State<Arc<str>>) -> Html<String> {
    Html(page.to_string())
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Bind the listening socket.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| InsightsError::ServerStart { addr, source })
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve_with_shutdown<F>(listener: TcpListener, page: Arc<str>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Dashboard available at http://{}/", addr);

    axum::serve(listener, build_router(page))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Serve until Ctrl+C.
pub async fn serve(listener: TcpListener, page: Arc<str>) -> Result<()> {
    serve_with_shutdown(listener, page, ctrl_c()).await
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received; shutting down"),
        Err(e) => {
            // Without a signal handler the server runs until the process is killed.
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
    debug!("Shutdown signal handled");
}
