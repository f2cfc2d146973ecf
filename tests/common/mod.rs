//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::any,
    Router,
};
use crud_gateway::config::GatewayConfig;
use crud_gateway::{HttpServer, Shutdown};
use serde_json::Value;
use tokio::net::TcpListener;

/// One call observed by the mock storage service.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub query: Option<String>,
    pub request_id: Option<String>,
    pub body: Value,
}

type Responder = dyn Fn(&Method, &Value) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Arc<Responder>,
}

/// Handle to a running mock storage service.
pub struct MockStorage {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockStorage {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn storage_handler(
    State(state): State<MockState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let (status, reply) = (state.responder)(&method, &body);
    state.calls.lock().unwrap().push(RecordedCall {
        method,
        query,
        request_id,
        body,
    });

    (
        StatusCode::from_u16(status).unwrap(),
        [("content-type", "application/json")],
        reply,
    )
}

/// Start a programmable storage service on an ephemeral port.
pub async fn start_mock_storage<F>(responder: F) -> MockStorage
where
    F: Fn(&Method, &Value) -> (u16, String) + Send + Sync + 'static,
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        calls: calls.clone(),
        responder: Arc::new(responder),
    };

    let app = Router::new()
        .route("/api/v1/documents", any(storage_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockStorage { addr, calls }
}

/// Start a storage service that answers every verb with a canned success.
pub async fn start_default_storage() -> MockStorage {
    start_mock_storage(|method, _body| {
        let reply = match *method {
            Method::POST => r#"{"data":["id1"],"created":1}"#,
            Method::GET => r#"{"data":[{"_id":"id1","x":1}],"total":1}"#,
            Method::PUT => r#"{"data":["id1"],"updated":1}"#,
            Method::DELETE => r#"{"data":["id1"],"deleted":1}"#,
            _ => r#"{}"#,
        };
        (200, reply.to_string())
    })
    .await
}

/// Gateway configuration pointing at `storage_url`.
pub fn gateway_config(storage_url: &str, collection: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.crud.collection = collection.into();
    if let Some(storage) = config.services.get_mut("storage") {
        storage.url = storage_url.into();
        storage.timeout_secs = 2;
    }
    config
}

/// Start the gateway on an ephemeral port. Returns its base URL.
pub async fn start_gateway(config: GatewayConfig, shutdown: &Shutdown) -> String {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("http://{}", addr)
}
