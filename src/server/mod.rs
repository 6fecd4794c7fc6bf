pub mod routes;
pub mod state;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use std::net::SocketAddr;
use std::sync::Arc;

pub use routes::create_router;
pub use state::AppState;

/// Serve the API on `addr` until Ctrl-C.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<()> {
    let app = create_router(state);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);
    tracing::info!(
        "API endpoints: /api/protocols, /api/protocols/top, /api/ai-routing, /api/tokens"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal, stopping server...");
}
