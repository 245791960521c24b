//! bookdb-engine
//!
//! The query engine behind the read API: dispatches between the
//! full-text path and the unscoped-sample path, projects raw documents
//! into their public shape, and resolves point lookups.

use std::sync::Arc;

use bookdb_core::error::{Error, Result};
use bookdb_core::id::RecordId;
use bookdb_core::projection::project;
use bookdb_core::traits::DocumentStore;
use bookdb_core::types::{BookRecord, FacetResult};

/// Cap on the number of documents returned when no query text is
/// given. Query results carry no cap of their own.
pub const UNSCOPED_SAMPLE_LIMIT: usize = 600;

/// Stateless per request; one instance is shared for the process
/// lifetime. Failures from the store propagate immediately, there are
/// no retries and no partial results.
pub struct QueryEngine {
    store: Arc<dyn DocumentStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch records for a query. `None`, empty, and whitespace-only
    /// queries take the sample path: a bounded slice of the catalog
    /// with no relevance order and no highlight data. Anything else is
    /// a relevance-ranked full-text search; store order is preserved
    /// and every record carries its highlights, possibly empty.
    pub fn search(&self, query: Option<&str>) -> Result<Vec<BookRecord>> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let hits = self.store.search(q)?;
                Ok(hits
                    .into_iter()
                    .map(|hit| {
                        let mut record = project(&hit.raw);
                        record.highlights = Some(hit.highlights);
                        record
                    })
                    .collect())
            }
            None => {
                let docs = self.store.scan(UNSCOPED_SAMPLE_LIMIT)?;
                Ok(docs.iter().map(project).collect())
            }
        }
    }

    /// Corpus-wide facet distributions, independent of any query.
    pub fn facets(&self) -> Result<FacetResult> {
        self.store.facets()
    }

    /// Single-record lookup. A malformed id is an invalid request and
    /// never reaches the store; a well-formed id with no document is
    /// `NotFound`.
    pub fn get_by_id(&self, id: &str) -> Result<BookRecord> {
        let record_id = RecordId::parse(id)?;
        match self.store.get(&record_id)? {
            Some(raw) => Ok(project(&raw)),
            None => Err(Error::NotFound(format!("no book with id {record_id}"))),
        }
    }
}
