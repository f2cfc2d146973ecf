//! Storage service RPC client.
//!
//! # Responsibilities
//! - Send one JSON call to the storage service per gateway request
//! - Enforce connect and total call timeouts
//! - Forward the caller's request ID
//! - Turn non-success answers into errors carrying the storage message
//!
//! The client is cheap to clone and safe to share between handlers; reqwest
//! keeps one connection pool per client.

use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::config::ServiceConfig;
use crate::storage::error::{StorageError, StorageResult};

/// Path of the document resource on the storage service.
pub const DOCUMENTS_PATH: &str = "/api/v1/documents";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// A single call to the storage service.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageCall {
    pub method: Method,
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
    pub payload: Value,
    pub request_id: Option<String>,
}

impl StorageCall {
    pub fn new(method: Method, path: &'static str, payload: Value) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            payload,
            request_id: None,
        }
    }

    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }
}

/// Transport used by the dispatcher to reach the storage service.
///
/// Implementations return the raw response body of a successful call.
/// Dropping the returned future abandons the call.
pub trait StorageClient: Send + Sync {
    /// Service name, used for logs and metrics.
    fn name(&self) -> &str;

    fn call(&self, call: StorageCall) -> BoxFuture<'_, StorageResult<Vec<u8>>>;
}

/// reqwest-backed storage client.
#[derive(Debug, Clone)]
pub struct HttpStorageClient {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

impl HttpStorageClient {
    /// Build a client for the named service.
    pub fn new(name: impl Into<String>, config: &ServiceConfig) -> StorageResult<Self> {
        let parsed = Url::parse(&config.url).map_err(|e| StorageError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StorageError::InvalidUrl {
                url: config.url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(StorageError::Transport)?;

        Ok(Self {
            name: name.into(),
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Full URL for a resource path on this service.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, call: StorageCall) -> StorageResult<Vec<u8>> {
        let mut request = self
            .client
            .request(call.method.clone(), self.endpoint(call.path))
            .json(&call.payload);

        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(id) = &call.request_id {
            request = request.header(REQUEST_ID_HEADER, id);
        }

        let response = request.send().await.map_err(StorageError::from_reqwest)?;
        let status = response.status();
        let body = response.bytes().await.map_err(StorageError::from_reqwest)?;

        if !status.is_success() {
            tracing::warn!(
                service = %self.name,
                method = %call.method,
                status = status.as_u16(),
                "Storage call rejected"
            );
            return Err(StorageError::status(status.as_u16(), &body));
        }

        Ok(body.to_vec())
    }
}

impl StorageClient for HttpStorageClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, call: StorageCall) -> BoxFuture<'_, StorageResult<Vec<u8>>> {
        self.send(call).boxed()
    }
}
