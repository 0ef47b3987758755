//! API Module
//!
//! HTTP handlers and routing for the market cache server.
//!
//! # Endpoints
//! - `GET /api/indices` - All index quotes, memoized through the cache
//! - `GET /api/indices/:symbol` - One index quote
//! - `DELETE /api/cache` - Drop the memoized snapshot
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
