//! HTTP server implementation using Axum.

use crate::handlers::{handle_health, handle_rpc, rest};
use axum::{
    routing::{get, post},
    Router,
};
use larder_core::LarderApi;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Maximum requests processed at once; each may wait on the text-generation service.
const MAX_CONCURRENT_REQUESTS: usize = 64;

/// Application state shared across handlers.
pub struct AppState {
    /// Core API (store, index, resolver)
    pub api: LarderApi,
}

/// Build the router for the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/rpc", post(handle_rpc))
        .route("/api/search", post(rest::search))
        .route("/api/add", post(rest::add))
        .route("/api/delete", post(rest::delete))
        .route("/api/export", post(rest::export))
        .route("/api/ingredients", get(rest::list))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(api: LarderApi, host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let state = Arc::new(AppState { api });
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    Ok(actual_addr)
}
