//! Storage service integration.
//!
//! # Data Flow
//! ```text
//! CrudService (typed storage request)
//!     → serde_json::Value payload
//!     → client.rs (StorageClient::call, HTTP + JSON)
//!     → storage service /api/v1/documents
//!     → raw response body back to the dispatcher for decoding
//! ```
//!
//! # Design Decisions
//! - The dispatcher depends on the `StorageClient` trait, never on reqwest
//! - One call per request, no retries
//! - Timeouts are distinct from other transport errors

pub mod client;
pub mod error;

pub use client::{HttpStorageClient, StorageCall, StorageClient, DOCUMENTS_PATH};
pub use error::{StorageError, StorageResult};
