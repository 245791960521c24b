use bookdb_core::types::BookRecord;
use serde::{Deserialize, Serialize};

/// Query string for `GET /books`. An omitted, empty, or whitespace `q`
/// selects the unscoped sample.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Body of `GET /books`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub count: usize,
    pub books: Vec<BookRecord>,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
