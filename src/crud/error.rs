//! Dispatcher error definitions.

use std::fmt;

use reqwest::Method;
use thiserror::Error;

use crate::crud::validation::ValidationError;
use crate::storage::StorageError;

/// The four document operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Create,
    Read,
    Update,
    Delete,
}

impl Verb {
    /// Storage-side HTTP method for this verb.
    pub fn method(self) -> Method {
        match self {
            Verb::Create => Method::POST,
            Verb::Read => Method::GET,
            Verb::Update => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Read => "read",
            Verb::Update => "update",
            Verb::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while dispatching a document operation.
#[derive(Debug, Error)]
pub enum CrudError {
    /// The caller's request broke a validation rule. No storage call was made.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The storage call failed at the transport level or was rejected.
    #[error("failed to {verb} documents: {source}")]
    Storage {
        verb: Verb,
        #[source]
        source: StorageError,
    },

    /// The storage service answered with a payload of the wrong shape.
    #[error("failed to decode storage response for {verb}: {source}")]
    ResponseDecode {
        verb: Verb,
        #[source]
        source: serde_json::Error,
    },
}

impl CrudError {
    /// Short machine-readable stage name.
    pub fn kind(&self) -> &'static str {
        match self {
            CrudError::Validation(_) => "validation_failed",
            CrudError::Storage { .. } => "backend_call_failed",
            CrudError::ResponseDecode { .. } => "response_decode_failed",
        }
    }
}
