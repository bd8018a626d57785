//! Tests for the HTTP collaborators against a mock server

use super::*;
use crate::config::EndpointConfig;
use crate::core::batch::{
    BatchContext, BatchEntry, Failure, Method, Operation, ProcessResult, Row,
};
use crate::core::clients::{
    ContentApiClient, LoadError, OptimizerClient, RemoteError, ResultRecorder, StoreError,
    WarehouseClient,
};
use serde_json::json;
use std::collections::HashMap;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer) -> EndpointConfig {
    EndpointConfig {
        url: server.uri(),
        timeout: 5,
        headers: HashMap::new(),
    }
}

fn context() -> BatchContext {
    BatchContext {
        batch_number: 1,
        operation: Operation::Upsert,
        timestamp: "0001-01-01:00:00:00".to_string(),
    }
}

fn entries() -> Vec<BatchEntry> {
    vec![
        BatchEntry {
            batch_id: 0,
            method: Method::Insert,
            item_id: "0001".to_string(),
            product: Some(serde_json::Map::from_iter([(
                "title".to_string(),
                json!("Blue shoes"),
            )])),
        },
        BatchEntry {
            batch_id: 1,
            method: Method::Insert,
            item_id: "0002".to_string(),
            product: Some(serde_json::Map::new()),
        },
    ]
}

// ==================== Helper Tests ====================

#[test]
fn test_endpoint_url_joins_slashes() {
    assert_eq!(endpoint_url("http://a/", "/query"), "http://a/query");
    assert_eq!(endpoint_url("http://a", "query"), "http://a/query");
}

#[test]
fn test_create_http_client_rejects_bad_header() {
    let config = EndpointConfig {
        url: "http://localhost".to_string(),
        timeout: 5,
        headers: HashMap::from([("bad header".to_string(), "v".to_string())]),
    };
    assert!(create_http_client(&config).is_err());
}

// ==================== Warehouse Tests ====================

#[tokio::test]
async fn test_warehouse_loads_rows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_partial_json(json!({
            "source": "items_to_upsert",
            "start_index": 0,
            "batch_size": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"item_id": "0001", "title": "Blue shoes"},
            {"item_id": 2, "title": "Red shoes"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpWarehouseClient::new(&endpoint(&server)).unwrap();
    let rows: Vec<Row> = client.load_items("items_to_upsert", 0, 2).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id(), "0001");
    assert_eq!(rows[1].id(), "2");
}

#[tokio::test]
async fn test_warehouse_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500).set_body_string("query failed"))
        .mount(&server)
        .await;

    let client = HttpWarehouseClient::new(&endpoint(&server)).unwrap();
    let err = client.load_items("items_to_delete", 0, 10).await.unwrap_err();

    assert!(
        matches!(err, LoadError::Status { status: 500, ref message } if message == "query failed")
    );
}

// ==================== Content API Tests ====================

#[tokio::test]
async fn test_content_api_partial_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products/batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [
                {"batch_id": 0},
                {"batch_id": 1, "errors": {"message": "Missing title"}}
            ]
        })))
        .mount(&server)
        .await;

    let client = HttpContentApiClient::new(&endpoint(&server)).unwrap();
    let (successes, failures) = client
        .process_items(&entries(), &context(), Method::Insert)
        .await
        .unwrap();

    assert_eq!(successes, vec!["0001"]);
    assert_eq!(failures, vec![Failure::new("0002", "Missing title")]);
}

#[tokio::test]
async fn test_content_api_error_status_uses_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products/batch"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {"message": "Backend unavailable"}
        })))
        .mount(&server)
        .await;

    let client = HttpContentApiClient::new(&endpoint(&server)).unwrap();
    let err = client
        .process_items(&entries(), &context(), Method::Insert)
        .await
        .unwrap_err();

    assert_eq!(err, RemoteError::api(503, "Backend unavailable"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_content_api_error_status_falls_back_to_canonical_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products/batch"))
        .respond_with(ResponseTemplate::new(402))
        .mount(&server)
        .await;

    let client = HttpContentApiClient::new(&endpoint(&server)).unwrap();
    let err = client
        .process_items(&entries(), &context(), Method::Insert)
        .await
        .unwrap_err();

    assert_eq!(err, RemoteError::api(402, "Payment Required"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_content_api_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products/batch"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_secs(3))
                .set_body_json(json!({"entries": []})),
        )
        .mount(&server)
        .await;

    let config = EndpointConfig {
        timeout: 1,
        ..endpoint(&server)
    };
    let client = HttpContentApiClient::new(&config).unwrap();
    let err = client
        .process_items(&entries(), &context(), Method::Insert)
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::Timeout(_)));
}

// ==================== Optimizer Tests ====================

#[tokio::test]
async fn test_optimizer_returns_rewritten_entries() {
    let server = MockServer::start().await;
    let mut optimized = entries();
    optimized[1].product = Some(serde_json::Map::from_iter([(
        "title".to_string(),
        json!("Generated title"),
    )]));
    Mock::given(method("POST"))
        .and(path("/batch/optimize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "entries": optimized })))
        .mount(&server)
        .await;

    let client = HttpOptimizerClient::new(&endpoint(&server)).unwrap();
    let result = client.optimize(&entries(), &context()).await.unwrap();

    assert_eq!(result, optimized);
}

#[tokio::test]
async fn test_optimizer_rejects_entry_count_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/batch/optimize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "entries": [] })))
        .mount(&server)
        .await;

    let client = HttpOptimizerClient::new(&endpoint(&server)).unwrap();
    assert!(client.optimize(&entries(), &context()).await.is_err());
}

// ==================== Result Store Tests ====================

#[tokio::test]
async fn test_result_recorder_posts_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/results"))
        .and(body_partial_json(json!({
            "operation": "upsert",
            "timestamp": "0001-01-01:00:00:00",
            "batch_id": 1,
            "successful_item_ids": ["0001"],
            "failures": [{"item_id": "0002", "error_message": "Bad Request"}],
            "skipped_item_ids": []
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpResultRecorder::new(&endpoint(&server)).unwrap();
    let result = ProcessResult::new(
        vec!["0001".to_string()],
        vec![Failure::new("0002", "Bad Request")],
        vec![],
    );

    client
        .insert_result("upsert", &result, "0001-01-01:00:00:00", 1)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_result_recorder_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HttpResultRecorder::new(&endpoint(&server)).unwrap();
    let err = client
        .insert_result("delete", &ProcessResult::default(), "t", 3)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Status { status: 500, .. }));
}
