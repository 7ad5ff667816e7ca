//! Standalone HTTP API over the search operation.

pub mod handlers;
pub mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
};
use tracing::info;

use crate::search::SearchService;
use crate::upstream::CompletionClient;

pub fn create_router<C>(search: Arc<SearchService<C>>) -> Router
where
    C: CompletionClient + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Wrong methods on known paths fall through to the same 404 as unknown paths.
    // `get` also answers HEAD, so that is routed to the fallback explicitly.
    Router::new()
        .route(
            "/",
            get(handlers::index)
                .head(handlers::fallback)
                .fallback(handlers::fallback),
        )
        .route(
            "/health",
            get(handlers::health)
                .head(handlers::fallback)
                .fallback(handlers::fallback),
        )
        .route(
            "/search",
            post(handlers::search::<C>).fallback(handlers::fallback),
        )
        .fallback(handlers::fallback)
        .with_state(search)
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(cors)
}

/// Serves until a termination signal; the listener closes first so in-flight
/// responses can flush.
pub async fn serve<C>(search: Arc<SearchService<C>>, port: u16) -> std::io::Result<()>
where
    C: CompletionClient + Send + Sync + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, create_router(search))
        .with_graceful_shutdown(crate::shutdown::signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
