use axum::extract::{Path, Query};
use axum::{Extension, Json};
use bookdb_core::error::Error;
use bookdb_core::types::{BookRecord, FacetResult};
use bookdb_engine::QueryEngine;
use std::sync::Arc;

use crate::error::ApiError;
use crate::types::{SearchParams, SearchResponse};

/// Store calls do blocking index I/O, so they hop off the async
/// runtime. The await here is the only suspension point per request.
async fn run_store<T, F>(job: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, Error> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| ApiError(Error::Retrieval(err.to_string())))?
        .map_err(ApiError)
}

/// `GET /books?q=<text>`
pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(engine): Extension<Arc<QueryEngine>>,
) -> Result<Json<SearchResponse>, ApiError> {
    let books = run_store(move || engine.search(params.q.as_deref())).await?;
    Ok(Json(SearchResponse {
        count: books.len(),
        books,
    }))
}

/// `GET /books/facets`
pub async fn handle_facets(
    Extension(engine): Extension<Arc<QueryEngine>>,
) -> Result<Json<FacetResult>, ApiError> {
    let facets = run_store(move || engine.facets()).await?;
    Ok(Json(facets))
}

/// `GET /books/{id}`
pub async fn handle_get_book(
    Path(id): Path<String>,
    Extension(engine): Extension<Arc<QueryEngine>>,
) -> Result<Json<BookRecord>, ApiError> {
    let book = run_store(move || engine.get_by_id(&id)).await?;
    Ok(Json(book))
}
