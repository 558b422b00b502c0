mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{item, memory_store};
use news_fetcher::server::SearchReply;
use news_fetcher::{create_router, utils, AppState, NewsRepository};
use std::sync::Arc;
use tower::ServiceExt;

async fn router_with(items: &[news_fetcher::NewsItem]) -> Router {
    let store = memory_store().await;
    store.upsert(items).await.unwrap();
    create_router(AppState::new(Arc::new(store)), None)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_search_returns_matching_items() {
    let router = router_with(&[item("1", "Rust 2024"), item("2", "Go news"), item("3", "Rust async")]).await;

    let (status, body) = get(router, "/search?term=Rust").await;
    assert_eq!(status, StatusCode::OK);

    let reply: SearchReply = serde_json::from_slice(&body).unwrap();
    assert_eq!(reply.term, "Rust");
    let guids: Vec<_> = reply.results.iter().map(|i| i.guid.as_str()).collect();
    assert_eq!(guids, ["3", "1"]);
}

#[tokio::test]
async fn test_search_json_shape() {
    let router = router_with(&[item("1", "Hello")]).await;

    let (_, body) = get(router, "/search?term=Hel").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["term"], "Hel");
    assert_eq!(json["results"][0]["GUID"], "1");
    assert_eq!(json["results"][0]["Title"], "Hello");
    assert_eq!(json["results"][0]["Date"], "date of 1");
    assert_eq!(json["results"][0]["Link"], "https://example.com/1");
}

#[tokio::test]
async fn test_missing_or_blank_term_returns_everything() {
    let items = [item("1", "a"), item("2", "b")];

    let (_, body) = get(router_with(&items).await, "/search").await;
    let reply: SearchReply = serde_json::from_slice(&body).unwrap();
    assert_eq!(reply.term, "");
    assert_eq!(reply.results.len(), 2);

    let (_, body) = get(router_with(&items).await, "/search?term=%20%20").await;
    let reply: SearchReply = serde_json::from_slice(&body).unwrap();
    assert_eq!(reply.term, "");
    assert_eq!(reply.results[0].guid, "2");
}

#[tokio::test]
async fn test_no_match_gives_empty_results_array() {
    let (_, body) = get(router_with(&[item("1", "a")]).await, "/search?term=zzz").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["results"], serde_json::json!([]));
}

#[tokio::test]
async fn test_store_failure_is_a_server_error() {
    // no schema: every query fails
    let store = news_fetcher::NewsStore::in_memory().await.unwrap();
    let router = create_router(AppState::new(Arc::new(store)), None);

    let (status, body) = get(router, "/search?term=x").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_search_page_is_served_from_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    utils::write_index_page(dir.path()).await.unwrap();
    let store = memory_store().await;
    let router = create_router(AppState::new(Arc::new(store)), Some(dir.path()));

    let (status, body) = get(router.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("News aggregator"));

    let (status, body) = get(router, "/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("sendReq"));
}
