//! bookdb-text
//!
//! Tantivy-backed document store for the book catalog: schema and
//! tokenizer setup, the ingest-side indexer, and the read-side store
//! the query engine talks to.

pub mod index;
pub mod store;
pub mod tantivy_utils;

pub use index::BookIndexer;
pub use store::TantivyBookStore;
