//! Domain types shared by the store, engine, client, and API crates.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Facet names as they appear in a [`FacetResult`].
pub const CATEGORIES_FACET: &str = "categoriesFacet";
pub const RATING_FACET: &str = "ratingFacet";
pub const PRICE_FACET: &str = "priceFacet";

/// Lower boundaries of the price histogram. Bucket `k` covers
/// `[BOUNDS[k], BOUNDS[k + 1])`; the last bucket is open-ended.
pub const PRICE_BUCKET_BOUNDS: [f64; 6] = [0.0, 10.0, 20.0, 40.0, 60.0, 100.0];

/// Bucket labels, the lower boundary rendered as a string.
pub const PRICE_BUCKET_LABELS: [&str; 6] = ["0", "10", "20", "40", "60", "100"];

/// Index of the price bucket covering `price`. Negative and non-finite
/// values land in the first bucket.
pub fn price_bucket_index(price: f64) -> usize {
    let mut index = 0;
    for (i, bound) in PRICE_BUCKET_BOUNDS.iter().enumerate() {
        if price >= *bound {
            index = i;
        }
    }
    index
}

/// Label of the price bucket covering `price`.
pub fn price_bucket_label(price: f64) -> &'static str {
    PRICE_BUCKET_LABELS[price_bucket_index(price)]
}

/// A catalog entry in its public shape, produced by projection from a
/// loose source document.
///
/// - `id`: stable 24-hex identifier, never empty after projection
/// - `price`: normalized to a finite, non-negative number
/// - `rating`: 0 (unrated or unrecognized) through 5
/// - `highlights`: present only for records produced by a text query,
///   absent on the unscoped-sample path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub review_count: u64,
    pub rating: u8,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Highlights>,
}

/// Highlight data for the two display fields a query can match on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<FieldHighlight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldHighlight>,
}

impl Highlights {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// A window of field text plus the ranges of the matched terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldHighlight {
    pub fragment: String,
    pub spans: Vec<Span>,
}

/// Byte range within a highlight fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A raw hit coming back from a document store query.
///
/// `raw` is the stored source document. `score` is backend-specific but
/// higher is always better; hits arrive already ordered by it.
#[derive(Debug, Clone)]
pub struct StoreHit {
    pub raw: Value,
    pub score: f32,
    pub highlights: Highlights,
}

/// One bucket of a facet distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetBucket {
    pub label: String,
    pub count: u64,
}

/// Facet distributions keyed by facet name ([`CATEGORIES_FACET`],
/// [`RATING_FACET`], [`PRICE_FACET`]). Serializes as a flat JSON object;
/// an empty corpus produces `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetResult {
    pub facets: BTreeMap<String, Vec<FacetBucket>>,
}

impl FacetResult {
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn insert(&mut self, name: &str, buckets: Vec<FacetBucket>) {
        self.facets.insert(name.to_string(), buckets);
    }

    pub fn get(&self, name: &str) -> Option<&[FacetBucket]> {
        self.facets.get(name).map(Vec::as_slice)
    }
}
