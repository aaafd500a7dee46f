// file: src/server/routes.rs
// description: route table and HTTP listener
// reference: https://docs.rs/axum

use crate::error::Result;
use crate::query::SearchMode;
use crate::server::handlers::{
    AppState, handle_fuzzy_search, handle_hashtags_search, handle_health, handle_users_search,
};
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(SearchMode::Users.route(), get(handle_users_search))
        .route(SearchMode::Hashtags.route(), get(handle_hashtags_search))
        .route(SearchMode::Fuzzy.route(), get(handle_fuzzy_search))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until Ctrl+C.
pub async fn serve(listen: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!("Server started on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Cannot listen for Ctrl+C, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
