//! Document dispatcher.
//!
//! Every operation follows the same template:
//! validate → resolve collection → build storage request → call storage →
//! decode storage response → build public response.
//! A call fails at the first failing step and issues at most one storage call.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CrudConfig;
use crate::crud::collection;
use crate::crud::error::{CrudError, Verb};
use crate::crud::types::*;
use crate::crud::validation::{Validate, ValidationError};
use crate::observability::metrics;
use crate::storage::{StorageCall, StorageClient, StorageError, DOCUMENTS_PATH};

/// Per-request data that travels with a call but is not part of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(request_id: Option<String>) -> Self {
        Self { request_id }
    }
}

/// Read modifiers passed outside the request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Ask the storage service to include a total count.
    pub count: bool,
}

/// Stateless dispatcher for the four document operations.
#[derive(Clone)]
pub struct CrudService {
    storage: Arc<dyn StorageClient>,
    config: CrudConfig,
}

impl CrudService {
    pub fn new(storage: Arc<dyn StorageClient>, config: CrudConfig) -> Self {
        Self { storage, config }
    }

    /// Base collection name from configuration.
    pub fn base_collection(&self) -> &str {
        &self.config.collection
    }

    fn collection(&self, prefix: &str) -> String {
        collection::resolve(prefix, &self.config.collection)
    }

    /// Insert `req.data` into the prefixed collection.
    pub async fn create(
        &self,
        req: CreateRequest,
        ctx: &RequestContext,
    ) -> Result<CreateResponse, CrudError> {
        req.validate()?;

        let storage_req = CreateDocumentsRequest {
            collection: self.collection(&req.prefix),
            data: req.data,
        };

        let res: CreateDocumentsResponse = self
            .dispatch(Verb::Create, &storage_req, &[], ctx)
            .await?;
        Ok(res.into())
    }

    /// Query the prefixed collection; `options.count` asks storage for a total.
    pub async fn read(
        &self,
        req: ReadRequest,
        options: ReadOptions,
        ctx: &RequestContext,
    ) -> Result<ReadResponse, CrudError> {
        req.validate()?;

        let storage_req = ReadDocumentsRequest {
            collection: self.collection(&req.prefix),
            filter: req.filter,
            sort: req.sort,
            limit: req.limit,
            skip: req.skip,
        };

        let query: &[(&'static str, &str)] = if options.count { &[("count", "1")] } else { &[] };
        let res: ReadDocumentsResponse = self.dispatch(Verb::Read, &storage_req, query, ctx).await?;
        Ok(res.into())
    }

    /// Apply `req.data` to documents matching a non-empty filter.
    pub async fn update(
        &self,
        req: UpdateRequest,
        ctx: &RequestContext,
    ) -> Result<UpdateResponse, CrudError> {
        req.validate()?;

        let filter = req.filter.ok_or(ValidationError::MissingFilter)?;
        let data = req.data.ok_or(ValidationError::MissingData)?;

        let storage_req = UpdateDocumentsRequest {
            collection: self.collection(&req.prefix),
            filter,
            data,
            upsert: req.upsert,
        };

        let res: UpdateDocumentsResponse = self
            .dispatch(Verb::Update, &storage_req, &[], ctx)
            .await?;
        Ok(res.into())
    }

    /// Remove documents matching a non-empty filter.
    pub async fn delete(
        &self,
        req: DeleteRequest,
        ctx: &RequestContext,
    ) -> Result<DeleteResponse, CrudError> {
        req.validate()?;

        let filter = req.filter.ok_or(ValidationError::MissingFilter)?;

        let storage_req = DeleteDocumentsRequest {
            collection: self.collection(&req.prefix),
            filter,
        };

        let res: DeleteDocumentsResponse = self
            .dispatch(Verb::Delete, &storage_req, &[], ctx)
            .await?;
        Ok(res.into())
    }

    /// Send one storage call and decode its answer.
    async fn dispatch<Req, Res>(
        &self,
        verb: Verb,
        payload: &Req,
        query: &[(&'static str, &str)],
        ctx: &RequestContext,
    ) -> Result<Res, CrudError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let payload = serde_json::to_value(payload).map_err(|e| CrudError::Storage {
            verb,
            source: StorageError::Encode(e),
        })?;

        let mut call = StorageCall::new(verb.method(), DOCUMENTS_PATH, payload)
            .with_request_id(ctx.request_id.clone());
        for (key, value) in query {
            call = call.with_query(*key, *value);
        }

        tracing::debug!(
            request_id = ctx.request_id.as_deref().unwrap_or("unknown"),
            service = %self.storage.name(),
            verb = %verb,
            "Calling storage"
        );

        let start_time = Instant::now();
        let result = self.storage.call(call).await;
        metrics::record_storage_call(self.storage.name(), verb.as_str(), result.is_ok(), start_time);

        let body = result.map_err(|source| {
            tracing::error!(
                request_id = ctx.request_id.as_deref().unwrap_or("unknown"),
                service = %self.storage.name(),
                verb = %verb,
                error = %source,
                "Storage call failed"
            );
            CrudError::Storage { verb, source }
        })?;

        serde_json::from_slice(&body).map_err(|source| {
            tracing::error!(
                request_id = ctx.request_id.as_deref().unwrap_or("unknown"),
                verb = %verb,
                error = %source,
                "Storage response did not match the expected shape"
            );
            CrudError::ResponseDecode { verb, source }
        })
    }
}
