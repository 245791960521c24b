use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;
use tantivy::schema::Facet;
use tantivy::{Index, TantivyDocument};

use bookdb_core::projection::project;

use crate::tantivy_utils::{build_schema, register_tokenizer, CatalogFields};

pub struct BookIndexer {
    index: Index,
    fields: CatalogFields,
}

impl BookIndexer {
    /// Create a fresh index at `index_dir`, wiping whatever was there.
    pub fn create(index_dir: PathBuf) -> Result<Self> {
        let schema = build_schema();
        if index_dir.exists() {
            std::fs::remove_dir_all(&index_dir)?;
        }
        std::fs::create_dir_all(&index_dir)?;
        let index = Index::create_in_dir(&index_dir, schema.clone())?;
        register_tokenizer(&index);
        let fields = CatalogFields::resolve(&schema)?;
        Ok(Self { index, fields })
    }

    /// Index raw catalog documents.
    ///
    /// Each document gets its canonical record id written back into the
    /// stored copy so that projecting a stored document always
    /// reproduces the id it was indexed under. Documents repeating an
    /// already-seen id are skipped, keeping ids unique within the
    /// index. Returns the number of documents indexed.
    pub fn index_documents(&self, docs: &[Value]) -> Result<usize> {
        let mut index_writer = self.index.writer(50_000_000)?;
        let mut seen_ids = HashSet::new();
        let mut indexed = 0;

        let bar = ProgressBar::new(docs.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")?
                .progress_chars("#>-"),
        );
        bar.set_message("indexing");

        for doc in docs {
            bar.inc(1);
            let mut stored = doc.clone();
            let record = project(&stored);
            if !seen_ids.insert(record.id.clone()) {
                tracing::warn!("skipping duplicate record id {}", record.id);
                continue;
            }
            if let Value::Object(map) = &mut stored {
                map.insert("id".to_string(), Value::String(record.id.clone()));
            }

            let mut document = TantivyDocument::default();
            document.add_text(self.fields.id, &record.id);
            if !record.title.is_empty() {
                document.add_text(self.fields.title, &record.title);
            }
            if !record.description.is_empty() {
                document.add_text(self.fields.description, &record.description);
            }
            for category in &record.categories {
                document.add_text(self.fields.categories, category);
                document.add_facet(self.fields.category_facet, facet_path(category));
            }
            if let Some(label) = rating_label(&stored) {
                document.add_facet(self.fields.rating_facet, facet_path(&label));
            }
            document.add_facet(
                self.fields.price_bucket,
                facet_path(bookdb_core::types::price_bucket_label(record.price)),
            );
            document.add_text(self.fields.raw, stored.to_string());

            index_writer.add_document(document)?;
            indexed += 1;
        }
        index_writer.commit()?;
        bar.finish_with_message(format!("indexed {indexed} documents"));
        Ok(indexed)
    }
}

/// The rating facet groups the source's own representation: the word
/// labels ("One".."Five") or, for numeric sources, the number rendered
/// as a string. Documents without a usable rating contribute nothing.
fn rating_label(raw: &Value) -> Option<String> {
    match raw.get("rating") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

// Every label is one path segment. Building from the path form keeps an
// embedded '/' inside the segment instead of nesting it.
fn facet_path(label: &str) -> Facet {
    Facet::from_path(std::iter::once(label))
}
