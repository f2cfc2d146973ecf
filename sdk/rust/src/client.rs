use std::collections::BTreeMap;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    pub prefix: String,
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadRequest {
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Field name to direction: 1 ascending, -1 descending.
    pub sort: Option<BTreeMap<String, i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub prefix: String,
    pub filter: Map<String, Value>,
    pub data: Value,
    #[serde(default)]
    pub upsert: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub prefix: String,
    pub filter: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub data: Vec<String>,
    pub created: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadResponse {
    pub data: Vec<Map<String, Value>>,
    pub total: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub data: Vec<String>,
    pub updated: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub data: Vec<String>,
    pub deleted: i64,
}

/// Error body returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
    pub code: u16,
}

#[derive(Debug)]
pub enum GatewayError {
    Http(reqwest::Error),
    /// The gateway answered with a non-success status.
    Api { status: StatusCode, body: String },
}

impl GatewayError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Http(e) => e.status(),
            GatewayError::Api { status, .. } => Some(*status),
        }
    }

    /// Parsed error body, when the gateway sent one.
    pub fn body(&self) -> Option<ErrorBody> {
        match self {
            GatewayError::Api { body, .. } => serde_json::from_str(body).ok(),
            GatewayError::Http(_) => None,
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Http(e) => write!(f, "HTTP error: {}", e),
            GatewayError::Api { status, body } => write!(f, "gateway returned {}: {}", status, body),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Http(e)
    }
}

pub struct GatewayClient {
    client: Client,
    gateway_url: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self {
            client: Client::new(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn create(&self, req: &CreateRequest) -> Result<CreateResponse, GatewayError> {
        self.send(Method::POST, "", req).await
    }

    /// Read documents; `count` asks the gateway for a total.
    pub async fn read(&self, req: &ReadRequest, count: bool) -> Result<ReadResponse, GatewayError> {
        let query = if count { "?count=1" } else { "" };
        self.send(Method::GET, query, req).await
    }

    pub async fn update(&self, req: &UpdateRequest) -> Result<UpdateResponse, GatewayError> {
        self.send(Method::PUT, "", req).await
    }

    pub async fn delete(&self, req: &DeleteRequest) -> Result<DeleteResponse, GatewayError> {
        self.send(Method::DELETE, "", req).await
    }

    pub async fn health(&self) -> Result<bool, GatewayError> {
        let resp = self.client.get(format!("{}/health", self.gateway_url)).send().await?;
        Ok(resp.status().is_success())
    }

    async fn send<B, T>(&self, method: Method, query: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .request(method, format!("{}/api/v1{}", self.gateway_url, query))
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(GatewayError::Api { status, body });
        }

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_request_sort_is_numeric() {
        let req = ReadRequest {
            prefix: "t".into(),
            sort: Some(BTreeMap::from([("created_at".to_string(), -1)])),
            ..ReadRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"prefix": "t", "sort": {"created_at": -1}})
        );
    }
}
