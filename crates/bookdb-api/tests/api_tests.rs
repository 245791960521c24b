use axum::body::to_bytes;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use bookdb_api::handlers::{handle_facets, handle_get_book, handle_search};
use bookdb_api::types::{ErrorBody, SearchParams};
use bookdb_core::error::{Error, Result};
use bookdb_core::id::RecordId;
use bookdb_core::traits::DocumentStore;
use bookdb_core::types::{
    FacetBucket, FacetResult, FieldHighlight, Highlights, Span, StoreHit, CATEGORIES_FACET,
};
use bookdb_engine::QueryEngine;
use serde_json::{json, Value};
use std::sync::Arc;

const KNOWN_ID: &str = "0123456789abcdef01234567";

struct FixtureStore {
    offline: bool,
}

impl FixtureStore {
    fn check(&self) -> Result<()> {
        if self.offline {
            return Err(Error::Retrieval("backend offline".to_string()));
        }
        Ok(())
    }
}

impl DocumentStore for FixtureStore {
    fn search(&self, _query: &str) -> Result<Vec<StoreHit>> {
        self.check()?;
        Ok(vec![StoreHit {
            raw: json!({ "id": KNOWN_ID, "title": "Dragon Keep", "price": 12.5 }),
            score: 2.0,
            highlights: Highlights {
                title: Some(FieldHighlight {
                    fragment: "Dragon Keep".to_string(),
                    spans: vec![Span { start: 0, end: 6 }],
                }),
                description: None,
            },
        }])
    }

    fn scan(&self, limit: usize) -> Result<Vec<Value>> {
        self.check()?;
        Ok((0..limit.min(3))
            .map(|i| json!({ "title": format!("Book {i}") }))
            .collect())
    }

    fn facets(&self) -> Result<FacetResult> {
        self.check()?;
        let mut facets = FacetResult::default();
        facets.insert(
            CATEGORIES_FACET,
            vec![FacetBucket {
                label: "Fiction".to_string(),
                count: 2,
            }],
        );
        Ok(facets)
    }

    fn get(&self, id: &RecordId) -> Result<Option<Value>> {
        self.check()?;
        if id.to_string() == KNOWN_ID {
            Ok(Some(json!({ "id": KNOWN_ID, "title": "Dragon Keep" })))
        } else {
            Ok(None)
        }
    }
}

fn engine(offline: bool) -> Extension<Arc<QueryEngine>> {
    Extension(Arc::new(QueryEngine::new(Arc::new(FixtureStore {
        offline,
    }))))
}

async fn error_body(response: axum::response::Response) -> ErrorBody {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("error body is json")
}

#[tokio::test]
async fn search_without_query_returns_sample_with_count() {
    let Ok(axum::Json(response)) =
        handle_search(Query(SearchParams { q: None }), engine(false)).await
    else {
        panic!("sample path should succeed");
    };

    assert_eq!(response.count, 3);
    assert_eq!(response.count, response.books.len());
    assert!(response.books.iter().all(|b| b.highlights.is_none()));
}

#[tokio::test]
async fn search_with_query_carries_highlights() {
    let Ok(axum::Json(response)) = handle_search(
        Query(SearchParams {
            q: Some("dragon".to_string()),
        }),
        engine(false),
    )
    .await
    else {
        panic!("query path should succeed");
    };

    assert_eq!(response.count, 1);
    assert_eq!(response.books[0].title, "Dragon Keep");
    assert!(response.books[0].highlights.is_some());
}

#[tokio::test]
async fn facets_pass_through_as_flat_object() {
    let Ok(axum::Json(facets)) = handle_facets(engine(false)).await else {
        panic!("facets should succeed");
    };

    let buckets = facets.get(CATEGORIES_FACET).expect("categories facet");
    assert_eq!(buckets[0].label, "Fiction");
    assert_eq!(buckets[0].count, 2);
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let err = handle_get_book(Path("not-a-valid-id".to_string()), engine(false))
        .await
        .expect_err("malformed id must fail");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert!(body.error.contains("malformed record id"));
}

#[tokio::test]
async fn unknown_id_is_not_found_with_generic_body() {
    let err = handle_get_book(
        Path("ffffffffffffffffffffffff".to_string()),
        engine(false),
    )
    .await
    .expect_err("unknown id must fail");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_body(response).await.error, "book not found");
}

#[tokio::test]
async fn known_id_returns_projected_record() {
    let Ok(axum::Json(book)) = handle_get_book(Path(KNOWN_ID.to_string()), engine(false)).await
    else {
        panic!("known id should succeed");
    };

    assert_eq!(book.id, KNOWN_ID);
    assert_eq!(book.title, "Dragon Keep");
}

#[tokio::test]
async fn retrieval_failure_never_leaks_its_cause() {
    let err = handle_search(Query(SearchParams { q: None }), engine(true))
        .await
        .expect_err("offline store must fail");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = error_body(response).await;
    assert_eq!(body.error, "internal server error");
    assert!(!body.error.contains("offline"));
}

#[tokio::test]
async fn facet_failure_is_server_class() {
    let err = handle_facets(engine(true))
        .await
        .expect_err("offline store must fail");
    assert_eq!(
        err.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn router_assembles() {
    let Extension(engine) = engine(false);
    let _app = bookdb_api::router(engine);
}
