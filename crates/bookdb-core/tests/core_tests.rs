use bookdb_core::corpus;
use bookdb_core::id::RecordId;
use bookdb_core::projection::{project, project_id};
use bookdb_core::types::{price_bucket_index, price_bucket_label};
use serde_json::json;
use std::fs;

#[test]
fn projection_is_total_on_malformed_fields() {
    let raw = json!({
        "title": "Broken Book",
        "price": "not a price",
        "rating": "three",
        "number_of_reviews": "many",
        "categories": 42,
    });
    let record = project(&raw);

    assert_eq!(record.title, "Broken Book");
    assert_eq!(record.description, "");
    assert_eq!(record.price, 0.0);
    assert_eq!(record.rating, 0);
    assert_eq!(record.review_count, 0);
    assert!(record.categories.is_empty());
    assert!(record.image_url.is_none());
    assert!(record.highlights.is_none());
    assert_eq!(record.id.len(), 24);
}

#[test]
fn currency_strings_normalize_to_numbers() {
    let price = |v: serde_json::Value| project(&json!({ "price": v })).price;

    assert_eq!(price(json!("£51.77")), 51.77);
    assert_eq!(price(json!("$1,299.00")), 1299.0);
    assert_eq!(price(json!(23.5)), 23.5);
    assert_eq!(price(json!(-4.0)), 0.0);
    assert_eq!(price(json!("-12.50")), 0.0);
    assert_eq!(price(json!("£-4.20")), 0.0);
    assert_eq!(price(json!(null)), 0.0);
}

#[test]
fn textual_ratings_map_exactly() {
    let rating = |v: serde_json::Value| project(&json!({ "rating": v })).rating;

    assert_eq!(rating(json!("One")), 1);
    assert_eq!(rating(json!("Three")), 3);
    assert_eq!(rating(json!("Five")), 5);
    // Word matching is exact; unknown labels are unrated.
    assert_eq!(rating(json!("three")), 0);
    assert_eq!(rating(json!("Six")), 0);
    assert_eq!(rating(json!(4)), 4);
    assert_eq!(rating(json!(4.6)), 5);
    assert_eq!(rating(json!(9)), 5);
    assert_eq!(rating(json!(-2)), 0);
    assert_eq!(rating(json!(0.4)), 0);
}

#[test]
fn review_counts_coerce_to_integers() {
    let reviews = |v: serde_json::Value| project(&json!({ "number_of_reviews": v })).review_count;

    assert_eq!(reviews(json!(12)), 12);
    assert_eq!(reviews(json!(7.9)), 7);
    assert_eq!(reviews(json!("123")), 123);
    assert_eq!(reviews(json!("1,23")), 0);
    assert_eq!(reviews(json!(null)), 0);
    assert_eq!(reviews(json!(-5)), 0);
}

#[test]
fn categories_accept_list_or_lone_string() {
    let record = project(&json!({ "categories": ["Fiction", "Fantasy"] }));
    assert_eq!(record.categories, vec!["Fiction", "Fantasy"]);

    let record = project(&json!({ "categories": "Poetry" }));
    assert_eq!(record.categories, vec!["Poetry"]);

    let record = project(&json!({ "categories": ["Fiction", 3, null] }));
    assert_eq!(record.categories, vec!["Fiction"]);
}

#[test]
fn id_resolution_precedence() {
    let hex = project_id(&json!({ "id": "ABCDEF0123456789abcdef01", "_id": "x" }));
    assert_eq!(hex, "abcdef0123456789abcdef01");

    let oid = project_id(&json!({ "_id": { "$oid": "0123456789abcdef01234567" } }));
    assert_eq!(oid, "0123456789abcdef01234567");

    let from_upc = project_id(&json!({ "upc": "a897fe39b1053632" }));
    assert_eq!(from_upc.len(), 24);
    assert_eq!(from_upc, project_id(&json!({ "upc": "a897fe39b1053632" })));

    // Nothing to go on: the document itself seeds the id.
    let doc = json!({ "title": "Anonymous" });
    assert_eq!(project_id(&doc), project_id(&doc));
    assert_ne!(project_id(&doc), project_id(&json!({ "title": "Other" })));
}

#[test]
fn non_hex_ids_become_stable_derived_ids() {
    let a = project_id(&json!({ "id": "book-42" }));
    let b = project_id(&json!({ "id": "book-42" }));
    let c = project_id(&json!({ "id": "book-43" }));

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(RecordId::parse(&a).is_ok());
}

#[test]
fn record_id_parse_validates_shape() {
    assert!(RecordId::parse("not-a-valid-id").is_err());
    assert!(RecordId::parse("0123456789abcdef0123456").is_err());
    assert!(RecordId::parse("0123456789abcdef012345678").is_err());
    assert!(RecordId::parse("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
    assert!(RecordId::parse("").is_err());

    let id = RecordId::parse("  ABCDEF0123456789abcdef01  ").expect("mixed case with padding");
    assert_eq!(id.to_string(), "abcdef0123456789abcdef01");
}

#[test]
fn derived_ids_roundtrip_through_display() {
    let id = RecordId::derive("seed");
    let reparsed = RecordId::parse(&id.to_string()).expect("display output parses");
    assert_eq!(id, reparsed);
    assert_eq!(RecordId::derive("seed"), id);
    assert_ne!(RecordId::derive("seeds"), id);
}

#[test]
fn price_buckets_are_half_open_with_overflow() {
    assert_eq!(price_bucket_label(0.0), "0");
    assert_eq!(price_bucket_label(9.99), "0");
    assert_eq!(price_bucket_label(10.0), "10");
    assert_eq!(price_bucket_label(39.9), "20");
    assert_eq!(price_bucket_label(40.0), "40");
    assert_eq!(price_bucket_label(99.99), "60");
    assert_eq!(price_bucket_label(100.0), "100");
    assert_eq!(price_bucket_label(2500.0), "100");
    assert_eq!(price_bucket_index(-5.0), 0);
}

#[test]
fn corpus_loader_reads_json_and_jsonl() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("a.json"),
        r#"[{"title": "A1"}, {"title": "A2"}]"#,
    )
    .expect("write a.json");
    fs::write(
        dir.path().join("b.jsonl"),
        "{\"title\": \"B1\"}\n\n{\"title\": \"B2\"}\nnot json\n",
    )
    .expect("write b.jsonl");
    fs::write(dir.path().join("c.json"), r#"{"title": "C1"}"#).expect("write c.json");
    fs::write(dir.path().join("d.txt"), "ignored").expect("write d.txt");
    fs::write(dir.path().join("e.json"), "{broken").expect("write e.json");

    let docs = corpus::load_dir(dir.path()).expect("load corpus");
    let titles: Vec<&str> = docs
        .iter()
        .filter_map(|d| d.get("title").and_then(|t| t.as_str()))
        .collect();

    assert_eq!(titles, vec!["A1", "A2", "B1", "B2", "C1"]);
}

#[test]
fn corpus_loader_rejects_missing_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope");
    assert!(corpus::load_dir(&missing).is_err());
}
