//! Document operations.
//!
//! # Data Flow
//! ```text
//! Public request (prefix + fields)
//!     → validation.rs (reject before any work)
//!     → collection.rs (prefix + "_" + base collection)
//!     → service.rs (build storage request, call storage, decode)
//!     → Public response (fields copied 1:1)
//! ```
//!
//! # Design Decisions
//! - Payload fields stay `serde_json::Value`; validation inspects JSON shape
//! - The dispatcher receives its storage client and config at construction
//! - Storage failures carry the verb that produced them

pub mod collection;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

pub use error::{CrudError, Verb};
pub use service::{CrudService, ReadOptions, RequestContext};
pub use types::*;
pub use validation::{Validate, ValidationError};
