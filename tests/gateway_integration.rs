//! End-to-end tests: SDK → gateway → mock storage service.

use std::time::Duration;

use axum::http::{Method, StatusCode};
use crud_gateway::Shutdown;
use crud_gateway_sdk::client::{CreateRequest, DeleteRequest, ReadRequest, UpdateRequest};
use crud_gateway_sdk::GatewayClient;
use serde_json::{json, Map, Value};

mod common;

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_create_reaches_tenant_collection() {
    let storage = common::start_default_storage().await;
    let shutdown = Shutdown::new();
    let url = common::start_gateway(common::gateway_config(&storage.url(), "orders"), &shutdown).await;

    let client = GatewayClient::new(&url);
    let res = client
        .create(&CreateRequest {
            prefix: "tenantA".into(),
            data: vec![json!({"x": 1})],
        })
        .await
        .unwrap();

    assert_eq!(res.data, vec!["id1".to_string()]);
    assert_eq!(res.created, 1);

    let calls = storage.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(calls[0].body, json!({"collection": "tenantA_orders", "data": [{"x": 1}]}));
    assert!(calls[0].request_id.is_some(), "request id should be forwarded");

    shutdown.trigger();
}

#[tokio::test]
async fn test_all_verbs_round_trip() {
    let storage = common::start_default_storage().await;
    let shutdown = Shutdown::new();
    let url = common::start_gateway(common::gateway_config(&storage.url(), "docs"), &shutdown).await;
    let client = GatewayClient::new(&url);

    let read = client
        .read(
            &ReadRequest {
                prefix: "t".into(),
                filter: Some(object(json!({"x": 1}))),
                limit: Some(10),
                ..ReadRequest::default()
            },
            true,
        )
        .await
        .unwrap();
    assert_eq!(read.total, Some(1));
    assert_eq!(read.data, vec![object(json!({"_id": "id1", "x": 1}))]);

    let updated = client
        .update(&UpdateRequest {
            prefix: "t".into(),
            filter: object(json!({"_id": "id1"})),
            data: json!({"x": 2}),
            upsert: false,
        })
        .await
        .unwrap();
    assert_eq!(updated.updated, 1);

    let deleted = client
        .delete(&DeleteRequest {
            prefix: "t".into(),
            filter: object(json!({"_id": "id1"})),
        })
        .await
        .unwrap();
    assert_eq!(deleted.deleted, 1);

    let calls = storage.calls();
    let methods: Vec<Method> = calls.iter().map(|c| c.method.clone()).collect();
    assert_eq!(methods, vec![Method::GET, Method::PUT, Method::DELETE]);
    assert_eq!(calls[0].query.as_deref(), Some("count=1"));
    assert_eq!(
        calls[0].body,
        json!({"collection": "t_docs", "filter": {"x": 1}, "limit": 10})
    );
    assert!(calls.iter().all(|c| c.body["collection"] == "t_docs"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_validation_failures_never_reach_storage() {
    let storage = common::start_default_storage().await;
    let shutdown = Shutdown::new();
    let url = common::start_gateway(common::gateway_config(&storage.url(), "docs"), &shutdown).await;
    let client = GatewayClient::new(&url);

    let err = client
        .delete(&DeleteRequest { prefix: "t".into(), filter: Map::new() })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.body().unwrap().kind, "validation_failed");

    let err = client
        .create(&CreateRequest { prefix: String::new(), data: vec![json!({"x": 1})] })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));

    // Malformed body on the read endpoint.
    let res = reqwest::Client::new()
        .get(format!("{}/api/v1", url))
        .body("{\"prefix\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "decode_failed");

    assert!(storage.calls().is_empty());
    shutdown.trigger();
}

#[tokio::test]
async fn test_storage_errors_map_to_gateway_statuses() {
    let storage = common::start_mock_storage(|method, _| match *method {
        Method::POST => (500, r#"{"error":"disk full"}"#.to_string()),
        _ => (200, r#"{"data": 42}"#.to_string()),
    })
    .await;
    let shutdown = Shutdown::new();
    let url = common::start_gateway(common::gateway_config(&storage.url(), "docs"), &shutdown).await;
    let client = GatewayClient::new(&url);

    let err = client
        .create(&CreateRequest { prefix: "t".into(), data: vec![json!({})] })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    let body = err.body().unwrap();
    assert_eq!(body.kind, "backend_call_failed");
    assert!(body.error.starts_with("failed to create documents"));
    assert!(body.error.contains("disk full"));

    let err = client
        .read(&ReadRequest { prefix: "t".into(), ..ReadRequest::default() }, false)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.body().unwrap().kind, "response_decode_failed");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_storage_is_bad_gateway() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener);

    let shutdown = Shutdown::new();
    let config = common::gateway_config(&format!("http://{}", dead_addr), "docs");
    let url = common::start_gateway(config, &shutdown).await;

    let err = GatewayClient::new(&url)
        .delete(&DeleteRequest { prefix: "t".into(), filter: object(json!({"a": 1})) })
        .await
        .unwrap_err();
    assert!(matches!(
        err.status(),
        Some(StatusCode::BAD_GATEWAY) | Some(StatusCode::GATEWAY_TIMEOUT)
    ));

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_and_shutdown() {
    let storage = common::start_default_storage().await;
    let shutdown = Shutdown::new();
    let url = common::start_gateway(common::gateway_config(&storage.url(), "docs"), &shutdown).await;
    let client = GatewayClient::new(&url);

    assert!(client.health().await.unwrap());

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let after = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
        .get(format!("{}/health", url))
        .send()
        .await;
    assert!(after.is_err(), "server should stop accepting after shutdown");
}
