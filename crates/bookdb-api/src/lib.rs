//! bookdb-api
//!
//! HTTP read surface over the query engine: three GET routes, JSON in
//! and out, the error taxonomy mapped onto status codes.

pub mod error;
pub mod handlers;
pub mod types;

use axum::routing::get;
use axum::{Extension, Router};
use bookdb_engine::QueryEngine;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Assemble the router. The engine is injected once and shared by
/// every request; non-GET methods on these routes are rejected by the
/// router itself.
pub fn router(engine: Arc<QueryEngine>) -> Router {
    Router::new()
        .route("/books", get(handlers::handle_search))
        .route("/books/facets", get(handlers::handle_facets))
        .route("/books/:id", get(handlers::handle_get_book))
        .layer(Extension(engine))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
