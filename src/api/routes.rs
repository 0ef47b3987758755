//! API Routes
//!
//! Configures the Axum router with all market cache server endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, health_handler, index_handler, indices_handler, stats_handler, AppState,
};
use crate::cache::Clock;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/indices` - All index quotes (memoized)
/// - `GET /api/indices/:symbol` - One index quote
/// - `DELETE /api/cache` - Drop the memoized snapshot
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: Clock + Send + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/indices", get(indices_handler::<C>))
        .route("/api/indices/:symbol", get(index_handler::<C>))
        .route("/api/cache", delete(clear_handler::<C>))
        .route("/stats", get(stats_handler::<C>))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
