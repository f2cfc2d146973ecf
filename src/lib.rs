//! CRUD gateway library.
//!
//! Validates document requests, derives the tenant collection name and
//! forwards them to the storage service.

pub mod config;
pub mod crud;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use config::schema::GatewayConfig;
pub use crud::CrudService;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use storage::{HttpStorageClient, StorageClient};
