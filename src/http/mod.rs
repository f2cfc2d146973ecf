//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assigned or kept)
//!     → handlers.rs (decode body, call dispatcher)
//!     → response.rs (error → status + JSON body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use handlers::AppState;
pub use request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{HttpServer, API_BASE_PATH};
