use serde_json::Value;
use std::path::Path;
use tantivy::collector::{FacetCollector, TopDocs};
use tantivy::query::{AllQuery, QueryParser, TermQuery};
use tantivy::schema::Value as _;
use tantivy::schema::{Facet, IndexRecordOption, Term};
use tantivy::snippet::SnippetGenerator;
use tantivy::{Index, IndexReader, Searcher, TantivyDocument};

use bookdb_core::error::{Error, Result};
use bookdb_core::id::RecordId;
use bookdb_core::traits::DocumentStore;
use bookdb_core::types::{
    FacetBucket, FacetResult, FieldHighlight, Highlights, Span, StoreHit, CATEGORIES_FACET,
    PRICE_BUCKET_LABELS, PRICE_FACET, RATING_FACET,
};

use crate::tantivy_utils::{register_tokenizer, CatalogFields};

/// Read side of the catalog index. One instance is opened at startup
/// and shared for the process lifetime; every call grabs a fresh
/// searcher, so concurrent reads need no locking.
pub struct TantivyBookStore {
    index: Index,
    reader: IndexReader,
    fields: CatalogFields,
}

impl TantivyBookStore {
    /// Open an existing index. Fails fast when the directory is missing
    /// or its schema lacks the catalog fields.
    pub fn open(index_dir: &Path) -> Result<Self> {
        let index = Index::open_in_dir(index_dir).map_err(Error::retrieval)?;
        register_tokenizer(&index);
        let fields = CatalogFields::resolve(&index.schema()).map_err(Error::retrieval)?;
        let reader = index.reader().map_err(Error::retrieval)?;
        Ok(Self {
            index,
            reader,
            fields,
        })
    }

    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    fn raw_of(&self, doc: &TantivyDocument) -> Result<Value> {
        let raw = doc
            .get_first(self.fields.raw)
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Retrieval("stored document missing raw payload".to_string()))?;
        serde_json::from_str(raw).map_err(Error::retrieval)
    }

    fn facet_buckets(&self, searcher: &Searcher, field: &str) -> Result<Vec<FacetBucket>> {
        let mut collector = FacetCollector::for_field(field);
        collector.add_facet(Facet::root());
        let counts = searcher
            .search(&AllQuery, &collector)
            .map_err(Error::retrieval)?;
        let mut buckets = Vec::new();
        for (facet, count) in counts.get("/") {
            // to_path yields the raw segments; Display would escape an
            // embedded '/'.
            buckets.push(FacetBucket {
                label: facet.to_path().join("/"),
                count,
            });
        }
        Ok(buckets)
    }
}

impl DocumentStore for TantivyBookStore {
    fn search(&self, query: &str) -> Result<Vec<StoreHit>> {
        let searcher = self.reader.searcher();
        let parser = QueryParser::for_index(
            &self.index,
            vec![
                self.fields.title,
                self.fields.description,
                self.fields.categories,
            ],
        );
        // Lenient parsing: stray quotes or operators in user input
        // degrade to a plain term query instead of failing the request.
        let (parsed, _syntax_errors) = parser.parse_query_lenient(query);

        // Every match is returned; the caller decides what to drop.
        let limit = usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX).max(1);
        let top_docs = searcher
            .search(&parsed, &TopDocs::with_limit(limit))
            .map_err(Error::retrieval)?;

        let title_snippets = SnippetGenerator::create(&searcher, &parsed, self.fields.title)
            .map_err(Error::retrieval)?;
        let description_snippets =
            SnippetGenerator::create(&searcher, &parsed, self.fields.description)
                .map_err(Error::retrieval)?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address).map_err(Error::retrieval)?;
            let highlights = Highlights {
                title: field_highlight(&title_snippets, &doc),
                description: field_highlight(&description_snippets, &doc),
            };
            hits.push(StoreHit {
                raw: self.raw_of(&doc)?,
                score,
                highlights,
            });
        }
        Ok(hits)
    }

    fn scan(&self, limit: usize) -> Result<Vec<Value>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let searcher = self.reader.searcher();
        let top_docs = searcher
            .search(&AllQuery, &TopDocs::with_limit(limit))
            .map_err(Error::retrieval)?;
        let mut docs = Vec::with_capacity(top_docs.len());
        for (_score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address).map_err(Error::retrieval)?;
            docs.push(self.raw_of(&doc)?);
        }
        Ok(docs)
    }

    fn facets(&self) -> Result<FacetResult> {
        let searcher = self.reader.searcher();
        let mut result = FacetResult::default();
        if searcher.num_docs() == 0 {
            return Ok(result);
        }

        result.insert(
            CATEGORIES_FACET,
            self.facet_buckets(&searcher, "category_facet")?,
        );
        result.insert(
            RATING_FACET,
            self.facet_buckets(&searcher, "rating_facet")?,
        );

        // Price buckets come back in boundary order, zero counts
        // included, so clients always see the full six-slot histogram.
        let counted = self.facet_buckets(&searcher, "price_bucket")?;
        let price = PRICE_BUCKET_LABELS
            .iter()
            .map(|label| FacetBucket {
                label: (*label).to_string(),
                count: counted
                    .iter()
                    .find(|bucket| bucket.label == *label)
                    .map_or(0, |bucket| bucket.count),
            })
            .collect();
        result.insert(PRICE_FACET, price);

        Ok(result)
    }

    fn get(&self, id: &RecordId) -> Result<Option<Value>> {
        let searcher = self.reader.searcher();
        let term = Term::from_field_text(self.fields.id, &id.to_string());
        let query = TermQuery::new(term, IndexRecordOption::Basic);
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(1))
            .map_err(Error::retrieval)?;
        match top_docs.first() {
            Some((_score, address)) => {
                let doc: TantivyDocument = searcher.doc(*address).map_err(Error::retrieval)?;
                Ok(Some(self.raw_of(&doc)?))
            }
            None => Ok(None),
        }
    }
}

fn field_highlight(generator: &SnippetGenerator, doc: &TantivyDocument) -> Option<FieldHighlight> {
    let snippet = generator.snippet_from_doc(doc);
    let spans: Vec<Span> = snippet
        .highlighted()
        .iter()
        .map(|range| Span {
            start: range.start,
            end: range.end,
        })
        .collect();
    if spans.is_empty() {
        return None;
    }
    Some(FieldHighlight {
        fragment: snippet.fragment().to_string(),
        spans,
    })
}
