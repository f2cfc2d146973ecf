//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the document API and health handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Build the storage client and dispatcher from configuration
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::crud::CrudService;
use crate::http::handlers::{self, AppState};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::storage::{HttpStorageClient, StorageClient, StorageError};

/// Mount point of the document API.
pub const API_BASE_PATH: &str = "/api/v1";

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server that talks to the storage service named in `config`.
    pub fn new(config: GatewayConfig) -> Result<Self, StorageError> {
        let name = config.crud.storage_service.clone();
        let service_config = config
            .storage_service()
            .ok_or_else(|| StorageError::NotConfigured(name.clone()))?;
        let storage = HttpStorageClient::new(name, service_config)?;

        tracing::info!(
            service = %storage.name(),
            url = %service_config.url,
            collection = %config.crud.collection,
            "Storage client ready"
        );

        Ok(Self::with_storage(config, Arc::new(storage)))
    }

    /// Create a server around an existing storage client.
    pub fn with_storage(config: GatewayConfig, storage: Arc<dyn StorageClient>) -> Self {
        let state = AppState {
            service: CrudService::new(storage, config.crud.clone()),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let documents = post(handlers::create)
            .get(handlers::read)
            .put(handlers::update)
            .delete(handlers::delete);

        Router::new()
            .route(API_BASE_PATH, documents.clone())
            .route(&format!("{}/", API_BASE_PATH), documents)
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// A clone of the router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
