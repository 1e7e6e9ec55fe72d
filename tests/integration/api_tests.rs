//! API integration tests, driving the router in-process over an in-memory store

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use book_catalog::{
    api,
    config::{AppConfig, DatabaseConfig},
    repository::Repository,
    AppState,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> Router {
    let config = AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        ..Default::default()
    };
    let repository = Repository::connect(&config.database)
        .await
        .expect("Failed to open in-memory database");
    api::router(AppState::new(config, repository))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

fn dune() -> Value {
    json!({
        "title": "Dune",
        "author": "Herbert",
        "genre": "SciFi",
        "publication_year": 1965,
        "price": 9.99
    })
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("Expected an array").clone()
}

async fn create(app: &Router, book: Value) -> i64 {
    let (status, body) = send(app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::OK);
    body["b_id"].as_i64().expect("No book ID")
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_list_starts_empty() {
    let app = test_app().await;
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_create_then_list() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::OK);
    let b_id = body["b_id"].as_i64().expect("No book ID");
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["publication_year"], 1965);
    assert_eq!(body["price"], 9.99);

    let books = list(&app).await;
    assert_eq!(
        books,
        vec![json!({
            "b_id": b_id,
            "title": "Dune",
            "author": "Herbert",
            "genre": "SciFi",
            "published_year": 1965,
            "price": 9.99
        })]
    );
}

#[tokio::test]
async fn test_create_accepts_form_strings() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({
            "title": "Dune",
            "author": "Herbert",
            "genre": "SciFi",
            "publication_year": "1965",
            "price": "9.99"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["publication_year"], 1965);
    assert_eq!(list(&app).await[0]["price"], 9.99);
}

#[tokio::test]
async fn test_created_ids_are_distinct() {
    let app = test_app().await;

    let first = create(&app, dune()).await;
    let second = create(&app, dune()).await;
    assert_ne!(first, second);
    assert_eq!(list(&app).await.len(), 2);
}

#[tokio::test]
async fn test_create_rejects_missing_or_empty_fields() {
    let app = test_app().await;

    for field in ["title", "author", "genre", "publication_year", "price"] {
        let mut missing = dune();
        missing.as_object_mut().unwrap().remove(field);
        let (status, body) = send(&app, Method::POST, "/books", Some(missing)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {}", field);
        assert_eq!(body["error"], "All fields must be valid.");
    }

    let mut empty = dune();
    empty["author"] = json!("");
    let (status, _) = send(&app, Method::POST, "/books", Some(empty)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_non_numeric_year_and_price() {
    let app = test_app().await;

    let mut bad_year = dune();
    bad_year["publication_year"] = json!("nineteen sixty-five");
    let (status, body) = send(&app, Method::POST, "/books", Some(bad_year)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields must be valid.");

    let mut bad_price = dune();
    bad_price["price"] = json!("cheap");
    let (status, _) = send(&app, Method::POST, "/books", Some(bad_price)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_server_only_checks_presence() {
    let app = test_app().await;

    // Letter-content rules live in the client form
    let mut blank = dune();
    blank["title"] = json!("   ");
    let (status, _) = send(&app, Method::POST, "/books", Some(blank)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_replaces_only_target() {
    let app = test_app().await;

    let target = create(&app, dune()).await;
    let other = create(
        &app,
        json!({
            "title": "The Hobbit",
            "author": "Tolkien",
            "genre": "Fantasy",
            "publication_year": 1937,
            "price": 12.5
        }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", target),
        Some(json!({
            "title": "Dune Messiah",
            "author": "Frank Herbert",
            "genre": "Science Fiction",
            "publication_year": 1969,
            "price": 11.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book updated" }));

    let books = list(&app).await;
    let updated = books.iter().find(|b| b["b_id"] == target).unwrap();
    assert_eq!(updated["title"], "Dune Messiah");
    assert_eq!(updated["published_year"], 1969);
    assert_eq!(updated["price"], 11.0);

    let untouched = books.iter().find(|b| b["b_id"] == other).unwrap();
    assert_eq!(untouched["title"], "The Hobbit");
    assert_eq!(untouched["published_year"], 1937);
}

#[tokio::test]
async fn test_update_unknown_id_reports_success() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::PUT, "/books/999", Some(dune())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book updated");
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_update_with_missing_fields_is_store_failure() {
    let app = test_app().await;
    let id = create(&app, dune()).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(json!({ "title": "Only a title" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("NOT NULL"));

    // The statement failed as a whole
    assert_eq!(list(&app).await[0]["title"], "Dune");
}

#[tokio::test]
async fn test_update_with_non_numeric_price_is_store_failure() {
    let app = test_app().await;
    let id = create(&app, dune()).await;

    let mut bad_price = dune();
    bad_price["price"] = json!("abc");
    let (status, body) = send(&app, Method::PUT, &format!("/books/{}", id), Some(bad_price)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("NOT NULL"));
    assert_eq!(list(&app).await[0]["price"], 9.99);
}

#[tokio::test]
async fn test_delete_removes_record() {
    let app = test_app().await;

    let keep = create(&app, dune()).await;
    let gone = create(&app, dune()).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", gone), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book deleted" }));

    let ids: Vec<i64> = list(&app)
        .await
        .iter()
        .map(|b| b["b_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![keep]);
}

#[tokio::test]
async fn test_delete_unknown_id_reports_success() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::DELETE, "/books/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book deleted");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::DELETE, "/books/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
