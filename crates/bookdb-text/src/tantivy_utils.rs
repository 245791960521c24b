use tantivy::schema::{
    FacetOptions, Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED,
    STRING,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, StopWordFilter, TextAnalyzer};
use tantivy::{Index, TantivyError};

pub const TOKENIZER_NAME: &str = "text_with_stopwords";

/// Catalog schema: exact-match id, tokenized title/description/categories,
/// one facet field per aggregation, and the stored source document.
pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    schema_builder.add_text_field("id", STRING | STORED);
    let text_field_indexing = TextFieldIndexing::default()
        .set_tokenizer(TOKENIZER_NAME)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let text_options = TextOptions::default()
        .set_indexing_options(text_field_indexing.clone())
        .set_stored();
    schema_builder.add_text_field("title", text_options.clone());
    schema_builder.add_text_field("description", text_options);
    schema_builder.add_text_field(
        "categories",
        TextOptions::default().set_indexing_options(text_field_indexing),
    );
    schema_builder.add_facet_field("category_facet", FacetOptions::default());
    schema_builder.add_facet_field("rating_facet", FacetOptions::default());
    schema_builder.add_facet_field("price_bucket", FacetOptions::default());
    schema_builder.add_text_field("raw", STORED);
    schema_builder.build()
}

/// Register the analyzer the text fields were indexed with. Must run
/// both when an index is created and when one is opened.
pub fn register_tokenizer(index: &Index) {
    let stop_words = vec![
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "or", "but", "not",
        "this", "these", "they", "them", "their", "there", "then", "than", "so", "if", "when",
        "where", "why", "how", "what", "which", "who", "whom", "whose", "can", "could", "should",
        "would", "may", "might", "must", "shall", "do", "does", "did", "have", "had", "having",
    ];
    let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(StopWordFilter::remove(
            stop_words.into_iter().map(|s| s.to_string()),
        ))
        .build();
    index.tokenizers().register(TOKENIZER_NAME, tokenizer);
}

/// Resolved handles for every field the indexer and the store touch.
pub struct CatalogFields {
    pub id: Field,
    pub title: Field,
    pub description: Field,
    pub categories: Field,
    pub category_facet: Field,
    pub rating_facet: Field,
    pub price_bucket: Field,
    pub raw: Field,
}

impl CatalogFields {
    pub fn resolve(schema: &Schema) -> Result<Self, TantivyError> {
        Ok(Self {
            id: schema.get_field("id")?,
            title: schema.get_field("title")?,
            description: schema.get_field("description")?,
            categories: schema.get_field("categories")?,
            category_facet: schema.get_field("category_facet")?,
            rating_facet: schema.get_field("rating_facet")?,
            price_bucket: schema.get_field("price_bucket")?,
            raw: schema.get_field("raw")?,
        })
    }
}
