//! Handler tests for Products domain
//!
//! These tests drive the products router directly with `oneshot`:
//! - Request deserialization and validation
//! - Response serialization (camelCase JSON)
//! - HTTP status codes and the Location header
//! - Error envelopes

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let store = Arc::new(InMemoryDataStore::new());
    handlers::router(ProductService::new(InMemoryUnitOfWorkFactory::new(store)))
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, name: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": name, "category": "Tools", "price": 9.99 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_returns_201_with_location() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Widget", "category": "Tools", "price": 9.99 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();

    let body = json_body(response.into_body()).await;
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["category"], "Tools");
    assert_eq!(body["price"], json!(9.99));
    assert_eq!(body["isDeleted"], false);
    assert!(body["createdAt"].is_string());
    assert_eq!(location, format!("/{}", body["id"].as_str().unwrap()));
}

#[tokio::test]
async fn test_create_invalid_body_lists_field_errors() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "", "category": " ", "price": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(
        body["errors"],
        json!([
            { "field": "category", "message": "Category is required." },
            { "field": "name", "message": "Name is required." },
            { "field": "price", "message": "Price must be greater than 0." }
        ])
    );
}

#[tokio::test]
async fn test_create_missing_fields_are_validation_errors() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_malformed_json_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_duplicate_name_is_400_conflict() {
    let app = app();
    create(&app, "Widget").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "WIDGET", "category": "Tools", "price": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "CONFLICT");
    assert_eq!(body["message"], "Name must be unique.");
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let id = uuid::Uuid::new_v4();
    let response = app()
        .oneshot(empty_request("GET", &format!("/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(
        body["message"],
        format!("Product with id '{id}' was not found.")
    );
}

#[tokio::test]
async fn test_malformed_id_is_400() {
    let response = app()
        .oneshot(empty_request("GET", "/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = app();
    let created = create(&app, "Widget").await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{id}"),
            json!({ "name": "Widget Pro", "category": "Premium", "price": 19.5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["name"], "Widget Pro");
    assert_eq!(body["category"], "Premium");
    assert_eq!(body["price"], json!(19.5));
    assert_eq!(body["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_list_rejects_malformed_query() {
    let response = app()
        .oneshot(empty_request("GET", "/?page=abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_list_defaults_and_paging_fields() {
    let app = app();
    for i in 0..3 {
        create(&app, &format!("Item {i}")).await;
    }

    let response = app
        .oneshot(empty_request("GET", "/?pageSize=2&page=2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["pageNumber"], 2);
    assert_eq!(body["pageSize"], 2);
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_soft_delete_lifecycle() {
    let app = app();
    let created = create(&app, "Widget").await;
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["isDeleted"], false);
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/?includeDeleted=true&keyword=Widget"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["items"][0]["id"], created["id"]);
    assert_eq!(body["items"][0]["isDeleted"], true);

    // Hidden from the default listing
    let response = app
        .oneshot(empty_request("GET", "/?keyword=Widget"))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["totalCount"], 0);
}

#[tokio::test]
async fn test_delete_unknown_id_is_404() {
    let response = app()
        .oneshot(empty_request("DELETE", &format!("/{}", uuid::Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
