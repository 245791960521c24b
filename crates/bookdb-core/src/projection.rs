//! Projection of loose catalog documents into the public record shape.
//!
//! [`project`] is total: any JSON value produces a well-formed
//! [`BookRecord`]. Out-of-domain field values coerce to their zero
//! values instead of being rejected, so one malformed document can
//! never poison a result set.

use crate::id::RecordId;
use crate::types::BookRecord;
use serde_json::Value;

const RATING_WORDS: [&str; 5] = ["One", "Two", "Three", "Four", "Five"];

/// Project a raw document into its public shape. Highlights are left
/// unset; the query path attaches them afterwards.
pub fn project(raw: &Value) -> BookRecord {
    BookRecord {
        id: project_id(raw),
        title: string_field(raw, "title"),
        description: string_field(raw, "description"),
        price: normalize_price(raw.get("price")),
        review_count: normalize_review_count(raw.get("number_of_reviews")),
        rating: normalize_rating(raw.get("rating")),
        categories: string_list(raw.get("categories")),
        image_url: raw
            .get("image_url")
            .and_then(Value::as_str)
            .map(str::to_string),
        highlights: None,
    }
}

/// Canonical id for a raw document: an `id` or `_id` that already is
/// 24-hex is kept (lowercased), any other id-ish value seeds a derived
/// id, and a document with nothing to go on is hashed whole. The
/// indexer uses the same resolution, so projecting a stored document
/// always reproduces the id it was indexed under.
pub fn project_id(raw: &Value) -> String {
    for key in ["id", "_id"] {
        if let Some(seed) = raw.get(key).and_then(id_seed) {
            return match RecordId::parse(&seed) {
                Ok(id) => id.to_string(),
                Err(_) => RecordId::derive(&seed).to_string(),
            };
        }
    }
    if let Some(upc) = raw.get("upc").and_then(Value::as_str) {
        if !upc.is_empty() {
            return RecordId::derive(upc).to_string();
        }
    }
    RecordId::derive(&raw.to_string()).to_string()
}

/// Normalize a price value: numbers pass through, strings are stripped
/// of currency symbols and grouping before parsing. Anything negative,
/// non-finite, or unparseable becomes 0.
pub fn normalize_price(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            // The sign survives the stripping so negative strings clamp
            // below, the same as negative numeric input.
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned.parse().unwrap_or(0.0)
        }
        _ => 0.0,
    };
    if parsed.is_finite() && parsed > 0.0 {
        parsed
    } else {
        0.0
    }
}

fn id_seed(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map
            .get("$oid")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn string_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn normalize_rating(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::String(s)) => RATING_WORDS
            .iter()
            .position(|w| *w == s.as_str())
            .map_or(0, |i| i as u8 + 1),
        Some(Value::Number(n)) => {
            let f = n.as_f64().unwrap_or(0.0);
            if f.is_finite() && f > 0.0 {
                f.round().min(5.0) as u8
            } else {
                0
            }
        }
        _ => 0,
    }
}

fn normalize_review_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}
