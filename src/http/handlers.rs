//! Document API handlers.
//!
//! Each handler decodes the JSON body into the public request type, runs
//! the dispatcher and encodes the result. Bodies are decoded regardless of
//! `Content-Type` because reads carry their query in a GET body.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::crud::{
    CreateRequest, CreateResponse, CrudService, DeleteRequest, DeleteResponse, ReadOptions,
    ReadRequest, ReadResponse, RequestContext, UpdateRequest, UpdateResponse, Verb,
};
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: CrudService,
}

/// Query parameters accepted by the read endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    pub count: Option<String>,
}

impl ReadParams {
    /// `count=1` or `count=true` asks for a total.
    pub fn wants_count(&self) -> bool {
        matches!(self.count.as_deref(), Some("1") | Some("true"))
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::decode)
}

fn finish<T: Serialize>(
    verb: Verb,
    ctx: &RequestContext,
    start_time: Instant,
    result: Result<T, ApiError>,
) -> Response {
    let response = match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            let request_id = ctx.request_id.as_deref().unwrap_or("unknown");
            if err.status().is_client_error() {
                tracing::warn!(request_id = %request_id, verb = %verb, error = %err.error, "Request rejected");
            } else {
                tracing::error!(request_id = %request_id, verb = %verb, error = %err.error, "Request failed");
            }
            err.into_response()
        }
    };

    metrics::record_request(verb.as_str(), response.status().as_u16(), start_time);
    response
}

/// POST /api/v1
pub async fn create(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let start_time = Instant::now();
    let ctx = RequestContext::new(request_id(&headers));

    let result: Result<CreateResponse, ApiError> = async {
        let req: CreateRequest = decode_body(&body)?;
        Ok(state.service.create(req, &ctx).await?)
    }
    .await;

    finish(Verb::Create, &ctx, start_time, result)
}

/// GET /api/v1
pub async fn read(
    State(state): State<AppState>,
    query: Result<Query<ReadParams>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let ctx = RequestContext::new(request_id(&headers));

    let result: Result<ReadResponse, ApiError> = async {
        let Query(params) = query.map_err(ApiError::query)?;
        let options = ReadOptions {
            count: params.wants_count(),
        };
        let req: ReadRequest = decode_body(&body)?;
        Ok(state.service.read(req, options, &ctx).await?)
    }
    .await;

    finish(Verb::Read, &ctx, start_time, result)
}

/// PUT /api/v1
pub async fn update(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let start_time = Instant::now();
    let ctx = RequestContext::new(request_id(&headers));

    let result: Result<UpdateResponse, ApiError> = async {
        let req: UpdateRequest = decode_body(&body)?;
        Ok(state.service.update(req, &ctx).await?)
    }
    .await;

    finish(Verb::Update, &ctx, start_time, result)
}

/// DELETE /api/v1
pub async fn delete(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let start_time = Instant::now();
    let ctx = RequestContext::new(request_id(&headers));

    let result: Result<DeleteResponse, ApiError> = async {
        let req: DeleteRequest = decode_body(&body)?;
        Ok(state.service.delete(req, &ctx).await?)
    }
    .await;

    finish(Verb::Delete, &ctx, start_time, result)
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_flag() {
        let none = ReadParams::default();
        assert!(!none.wants_count());

        for (raw, expected) in [("1", true), ("true", true), ("0", false), ("yes", false)] {
            let params = ReadParams { count: Some(raw.to_string()) };
            assert_eq!(params.wants_count(), expected, "count={raw}");
        }
    }

    #[test]
    fn test_decode_body_rejects_wrong_shape() {
        let err = decode_body::<CreateRequest>(br#"{"prefix": 5}"#).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, "decode_failed");

        let err = decode_body::<ReadRequest>(b"").unwrap_err();
        assert_eq!(err.kind, "decode_failed");
    }
}
