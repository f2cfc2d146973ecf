//! CRUD gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                   CRUD GATEWAY                    │
//!                    │                                                   │
//!   Client Request   │  ┌──────────┐   ┌────────────┐   ┌────────────┐  │
//!  ──────────────────┼─▶│   http   │──▶│    crud    │──▶│  storage   │──┼──▶ Storage
//!                    │  │ handlers │   │ validate + │   │   client   │  │    Service
//!                    │  └──────────┘   │  resolve   │   └─────┬──────┘  │
//!                    │                 └────────────┘         │         │
//!   Client Response  │  ┌──────────┐   ┌────────────┐         │         │
//!  ◀─────────────────┼──│ response │◀──│   decode   │◀────────┘         │
//!                    │  └──────────┘   └────────────┘                   │
//!                    │                                                   │
//!                    │  config · observability · lifecycle               │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use crud_gateway::config::load_or_default;
use crud_gateway::lifecycle::{signals, Shutdown};
use crud_gateway::observability::{logging, metrics};
use crud_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "crud-gateway")]
#[command(about = "Document CRUD gateway in front of a storage service", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_or_default(&args.config)?;
    logging::init_logging(&config.observability);

    tracing::info!("crud-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        collection = %config.crud.collection,
        storage_service = %config.crud.storage_service,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
