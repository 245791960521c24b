use crate::error::Result;
use crate::id::RecordId;
use crate::types::{FacetResult, StoreHit};
use serde_json::Value;

/// Read-only access to an indexed catalog of documents.
///
/// This is the seam between the query engine and a concrete backend:
/// production wires in the tantivy store, tests wire in doubles.
/// Implementations must be shareable across threads; the server holds
/// one instance behind an `Arc` for its whole lifetime.
pub trait DocumentStore: Send + Sync {
    /// Full-text query over the searchable fields. Hits come back
    /// ordered by descending relevance, with highlights computed for
    /// the display fields only.
    fn search(&self, query: &str) -> Result<Vec<StoreHit>>;

    /// Up to `limit` raw documents, no ordering contract, no highlight
    /// work.
    fn scan(&self, limit: usize) -> Result<Vec<Value>>;

    /// Corpus-wide facet distributions, independent of any query. An
    /// empty corpus yields an empty mapping, never an error.
    fn facets(&self) -> Result<FacetResult>;

    /// Point lookup by record id. `Ok(None)` when no document carries
    /// the id.
    fn get(&self, id: &RecordId) -> Result<Option<Value>>;
}
